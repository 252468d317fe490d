pub mod graph;
pub mod parser;
pub mod room;

pub use graph::{GraphStats, ParsedGraph, PathStats};
pub use parser::{parse, parse_file};
pub use room::{Room, Tunnel};
