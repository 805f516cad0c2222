pub mod expander;
pub mod grid_graph;
pub mod init_map;
pub mod reducer;
pub mod render;
pub mod shortcut;
pub mod stitcher;
