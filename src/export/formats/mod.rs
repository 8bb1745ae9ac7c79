pub mod fasta;
pub mod summary;
