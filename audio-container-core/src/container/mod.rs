pub mod extended;
pub mod format_chunk;
pub mod layout;
pub mod scanner;
pub mod sniffer;
