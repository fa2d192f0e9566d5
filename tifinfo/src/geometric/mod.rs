pub mod dump;
pub mod elevation;
pub mod geotransform;
pub mod processor;
pub mod raster;
pub mod record;
pub mod reproject;
