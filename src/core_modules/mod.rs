pub mod canvas;
pub mod features;
pub mod luminance;
pub mod motion;
pub mod regions;
pub mod renderers;
pub mod sampler;
