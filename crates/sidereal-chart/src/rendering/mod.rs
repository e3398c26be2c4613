pub mod generator;
pub mod primitives;
pub mod spec;
pub mod svg;
pub mod visual_config;

pub use generator::{ChartSpecGenerator, RenderOptions};
pub use primitives::{Color, LineStyle, Point, Ring, Shape, Stroke};
pub use spec::{ChartMetadata, ChartSpec, LegendEntry};
pub use svg::{render_svg, write_svg, RenderError};
pub use visual_config::VisualConfig;
