use core::hint::black_box;

use anyhow::Result;
use criterion::{Criterion, criterion_group, criterion_main};
use trellis::{
    AvailableSpace, Dimension, Display, FlexWrap, LayoutEngine, MeasureRequest, NodeId, Size, Style,
    TrackEntry, TrackSize, length_size, uniform_edges,
};

const AVAILABLE: Size<AvailableSpace> = Size {
    width: AvailableSpace::Definite(1024.0),
    height: AvailableSpace::Definite(768.0),
};

/// A text-like leaf: 8px per character, wrapping at the available width.
fn text_leaf(engine: &mut LayoutEngine, characters: u16) -> Result<NodeId> {
    let natural = f32::from(characters) * 8.0;
    Ok(engine.new_leaf_with_measure(Style::default(), move |request: &MeasureRequest| {
        let limit = request
            .known_dimensions
            .width
            .or_else(|| request.available_space.width.into_option())
            .unwrap_or(natural)
            .max(8.0);
        let width = natural.min(limit);
        Size {
            width,
            height: (natural / width).ceil() * 16.0,
        }
    })?)
}

/// Nested wrapping flex rows, `depth` levels of `breadth` children.
fn build_flex(engine: &mut LayoutEngine, depth: u16, breadth: u16) -> Result<NodeId> {
    if depth == 0 {
        return text_leaf(engine, 12 + breadth);
    }
    let children = (0..breadth)
        .map(|_| build_flex(engine, depth - 1, breadth))
        .collect::<Result<Vec<_>>>()?;
    Ok(engine.new_with_children(
        Style {
            flex_wrap: FlexWrap::Wrap,
            flex_grow: 1.0,
            padding: uniform_edges(2.0),
            ..Style::default()
        },
        &children,
    )?)
}

/// A grid of `cells` text cells over auto, fr and fixed columns.
fn build_grid(engine: &mut LayoutEngine, cells: u16) -> Result<NodeId> {
    let children = (0..cells)
        .map(|index| text_leaf(engine, 4 + index % 20))
        .collect::<Result<Vec<_>>>()?;
    Ok(engine.new_with_children(
        Style {
            display: Display::Grid,
            size: Size {
                width: Dimension::percent(1.0),
                height: Dimension::Auto,
            },
            grid_template_columns: vec![
                TrackEntry::Single(TrackSize::AUTO),
                TrackEntry::Single(TrackSize::fr(1.0)),
                TrackEntry::Single(TrackSize::length(120.0)),
                TrackEntry::Single(TrackSize::fr(2.0)),
            ],
            gap: length_size(4.0, 4.0),
            ..Style::default()
        },
        &children,
    )?)
}

/// A block document of `paragraphs` text blocks.
fn build_block(engine: &mut LayoutEngine, paragraphs: u16) -> Result<NodeId> {
    let children = (0..paragraphs)
        .map(|index| text_leaf(engine, 40 + index % 60))
        .collect::<Result<Vec<_>>>()?;
    Ok(engine.new_with_children(
        Style {
            display: Display::Block,
            ..Style::default()
        },
        &children,
    )?)
}

/// Every node under `root`, parents before children.
fn subtree(engine: &LayoutEngine, root: NodeId) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        nodes.push(node);
        if let Ok(children) = engine.children(node) {
            pending.extend_from_slice(children);
        }
    }
    nodes
}

/// Relayout a cached tree, then relayout it with every cache cleared.
fn bench_tree(
    criterion: &mut Criterion,
    name: &str,
    build: impl Fn(&mut LayoutEngine) -> Result<NodeId>,
) -> Result<()> {
    let mut engine = LayoutEngine::new();
    let root = build(&mut engine)?;
    engine.compute_layout(root, AVAILABLE)?;

    criterion.bench_function(&format!("{name}_cached"), |bencher| {
        bencher.iter(|| black_box(engine.compute_layout(root, AVAILABLE)));
    });
    let nodes = subtree(&engine, root);
    criterion.bench_function(&format!("{name}_full"), |bencher| {
        bencher.iter(|| {
            for node in &nodes {
                if let Err(error) = engine.mark_dirty(*node) {
                    log::error!(target: "trellis::bench", "[BENCH] {error}");
                }
            }
            black_box(engine.compute_layout(root, AVAILABLE))
        });
    });
    Ok(())
}

fn layout_throughput(criterion: &mut Criterion) {
    let runs: [(&str, &dyn Fn(&mut LayoutEngine) -> Result<NodeId>); 4] = [
        ("flex_deep", &|engine| build_flex(engine, 6, 3)),
        ("flex_wide", &|engine| build_flex(engine, 2, 40)),
        ("grid_cells", &|engine| build_grid(engine, 400)),
        ("block_paragraphs", &|engine| build_block(engine, 500)),
    ];
    for (name, build) in runs {
        if let Err(error) = bench_tree(criterion, name, build) {
            log::error!(target: "trellis::bench", "[BENCH] {name} setup failed: {error}");
        }
    }
}

criterion_group!(benches, layout_throughput);
criterion_main!(benches);
