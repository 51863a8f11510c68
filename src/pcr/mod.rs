mod error;
mod types;
mod iupac;
mod sequence;
mod motif;
mod product;
mod session;
mod screener;
mod fasta;

pub use error::*;
pub use types::*;
pub use iupac::*;
pub use sequence::*;
pub use motif::*;
pub use product::*;
pub use session::*;
pub use screener::*;
pub use fasta::*;
