mod report_renderer;

pub use report_renderer::render_report;
