pub mod smoothing_kernel;
pub mod spatial_grid;
pub mod update;
