pub mod align;
pub mod codec;
pub mod enrichment;
pub mod reviews;
pub mod sentiment;
pub mod suggestions;
