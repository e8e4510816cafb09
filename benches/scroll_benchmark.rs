//! Scroll performance benchmarks.
//!
//! Measures the per-frame cost of scrolling through large documents: the
//! scrollbar mapping for documents too tall for a native scrollbar, one
//! scroll step plus row decoding at several depths, and a full redraw of
//! the terminal host.
//!
//! Run with: cargo bench --bench scroll_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hexgrid::model::CodeType;
use hexgrid::source::{InputSource, MemoryData};
use hexgrid::view::{ColorConfig, HexStyles, TuiApp};
use hexgrid::view_state::scroll::{row_to_scaled_native, scaled_native_to_row, NATIVE_SCROLL_MAX};
use hexgrid::view_state::{
    EngineConfig, LayoutEngine, Metrics, ScrollAxis, ScrollPosition, ScrollingDirection,
    StructureConfig,
};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// 4 MiB of counting bytes.
const DOCUMENT_SIZE: usize = 4 * 1024 * 1024;

/// Depth in the document, as a fraction of the maximum scroll.
#[derive(Debug, Clone, Copy)]
enum Depth {
    Start,
    Middle,
    End,
}

impl Depth {
    fn name(&self) -> &'static str {
        match self {
            Depth::Start => "start",
            Depth::Middle => "middle",
            Depth::End => "end",
        }
    }

    fn row(&self, max_row: u64) -> u64 {
        match self {
            Depth::Start => 0,
            Depth::Middle => max_row / 2,
            Depth::End => max_row,
        }
    }
}

fn document() -> MemoryData {
    MemoryData::new((0..=255u8).cycle().take(DOCUMENT_SIZE).collect::<Vec<u8>>())
}

fn terminal_engine(code_type: CodeType, data_size: u64) -> LayoutEngine {
    let config = EngineConfig {
        structure: StructureConfig {
            code_type,
            ..StructureConfig::default()
        },
        ..EngineConfig::default()
    };
    let mut engine = LayoutEngine::new(config).unwrap();
    engine.set_metrics(Metrics::fixed(1, 1, 1)).unwrap();
    engine.recompute_layout(data_size).unwrap();
    engine.on_resize(200, 59).unwrap();
    engine
}

fn benchmark_scaled_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaled_mapping");

    for rows_to_last_page in [NATIVE_SCROLL_MAX * 2, u64::MAX / 16, u64::MAX] {
        group.bench_with_input(
            BenchmarkId::new("native_to_row", rows_to_last_page),
            &rows_to_last_page,
            |b, &rows| {
                b.iter(|| {
                    (0..NATIVE_SCROLL_MAX)
                        .step_by(1 << 20)
                        .fold(0u64, |acc, value| {
                            acc ^ scaled_native_to_row(black_box(value), rows)
                        })
                })
            },
        );
        group.bench_with_input(
            BenchmarkId::new("row_to_native", rows_to_last_page),
            &rows_to_last_page,
            |b, &rows| {
                b.iter(|| {
                    (0..rows)
                        .step_by((rows / 2048).max(1) as usize)
                        .take(2048)
                        .fold(0u64, |acc, row| acc ^ row_to_scaled_native(black_box(row), rows))
                })
            },
        );
    }

    group.finish();
}

fn benchmark_huge_document_scrollbar(c: &mut Criterion) {
    let mut engine = terminal_engine(CodeType::Hexadecimal, u64::MAX / 2);

    c.bench_function("scaled_scrollbar_drag", |b| {
        let mut value = 0i32;
        b.iter(|| {
            value = value.wrapping_add(1 << 16) & i32::MAX;
            black_box(engine.on_scroll(value, ScrollAxis::Vertical));
            black_box(engine.vertical_scrollbar())
        })
    });
}

fn benchmark_line_scroll_down(c: &mut Criterion) {
    let data = document();
    let mut group = c.benchmark_group("line_scroll_down");

    for code_type in [CodeType::Hexadecimal, CodeType::Binary] {
        for depth in [Depth::Start, Depth::Middle, Depth::End] {
            let baseline = terminal_engine(code_type, DOCUMENT_SIZE as u64);
            let bench_name = format!("{}_{}", depth.name(), code_type);

            group.bench_with_input(
                BenchmarkId::new("depth", bench_name),
                &depth,
                |b, &depth| {
                    b.iter_batched(
                        || {
                            let mut engine = baseline.clone();
                            let max_row = engine.max_scroll_position().row_position;
                            engine.set_scroll_position(ScrollPosition::new(
                                depth.row(max_row),
                                0,
                                0,
                                0,
                            ));
                            engine
                        },
                        |mut engine| {
                            engine.scroll(ScrollingDirection::Down);
                            black_box(engine.rows(&data).unwrap())
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

fn benchmark_page_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_redraw");

    // From the top page down; from the end page up.
    for (depth, step) in [(Depth::Start, KeyCode::PageDown), (Depth::End, KeyCode::PageUp)] {
        group.bench_with_input(
            BenchmarkId::new("depth", depth.name()),
            &(depth, step),
            |b, &(depth, step)| {
                b.iter_batched(
                    || {
                        let terminal = Terminal::new(TestBackend::new(200, 60)).unwrap();
                        let source = InputSource::Stdin(document());
                        let styles =
                            HexStyles::with_color_config(ColorConfig::from_env_and_args(true));
                        let mut app =
                            TuiApp::with_terminal(terminal, source, EngineConfig::default(), styles)
                                .unwrap();
                        if let Depth::End = depth {
                            app.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::CONTROL));
                        }
                        app.draw().unwrap();
                        app
                    },
                    |mut app| {
                        app.handle_key(KeyEvent::new(step, KeyModifiers::NONE));
                        app.draw().unwrap();
                        black_box(app.terminal().backend().buffer().clone())
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_scaled_mapping,
    benchmark_huge_document_scrollbar,
    benchmark_line_scroll_down,
    benchmark_page_redraw
);
criterion_main!(benches);
