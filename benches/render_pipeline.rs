//! Full render of the default canvas with latency and noise switched off.
//!
//! Run with: cargo bench --bench render_pipeline

use std::io;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use fractal_streamer::core::actions::render_tiles::async_renderer::AsyncTileRenderer;
use fractal_streamer::core::actions::render_tiles::sync_renderer::SyncTileRenderer;
use fractal_streamer::core::colour_maps::gradients::GradientKind;
use fractal_streamer::core::data::viewport::Viewport;
use fractal_streamer::core::fractals::mandelbrot::equation::MandelbrotEquation;
use fractal_streamer::{
    AsyncConfig, AsyncService, Canvas, EventStreamWriter, RenderJob, TileRenderer,
};

fn job(max_iterations: u32) -> RenderJob {
    RenderJob {
        viewport: Viewport::new(-2.0, 1.0, -1.3, 1.3).expect("default viewport"),
        max_iterations,
        equation: Arc::new(MandelbrotEquation::deterministic()),
        colour_map: Arc::new(GradientKind::Fire.palette(64).expect("fire gradient")),
        canvas: Canvas::default(),
    }
}

fn render(renderer: &dyn TileRenderer) {
    let writer = Arc::new(EventStreamWriter::new(io::sink()));
    renderer.render(writer).expect("render");
}

fn bench_render(c: &mut Criterion) {
    let service = AsyncService::new(AsyncConfig::default()).expect("worker pool");
    let mut group = c.benchmark_group("render_pipeline");
    group.sample_size(20);

    for max_iterations in [100, 500] {
        let sync = SyncTileRenderer::new(job(max_iterations));
        group.bench_with_input(
            BenchmarkId::new("sync", max_iterations),
            &sync,
            |b, renderer| b.iter(|| render(renderer)),
        );

        let pooled = AsyncTileRenderer::new(job(max_iterations), service.clone());
        group.bench_with_input(
            BenchmarkId::new("async", max_iterations),
            &pooled,
            |b, renderer| b.iter(|| render(renderer)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
