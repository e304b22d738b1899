pub mod adjacency;
pub mod connectivity;
pub mod match_index;
