use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cellbox::box_drawing::{Junction, resolve_glyph};
use cellbox::grid_style::Mask;
use cellbox::LineStyle;

fn bench_resolve_exact(c: &mut Criterion) {
    let junction = Junction::uniform(LineStyle::Thin);
    c.bench_function("resolve_glyph_exact", |b| b.iter(|| resolve_glyph(black_box(junction))));
}

fn bench_resolve_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_glyph_fallback");

    // Each junction needs more generalization steps than the one before
    let junctions = [
        ("one_step", Junction::new(LineStyle::Thin, LineStyle::Rounded, LineStyle::Thin, LineStyle::NoLine)),
        ("mixed_weights", Junction::new(LineStyle::Thin, LineStyle::Double, LineStyle::Rounded, LineStyle::Thick)),
        ("to_ascii", Junction::new(LineStyle::Thin, LineStyle::Ascii, LineStyle::Thin, LineStyle::Ascii)),
        (
            "half_blocks",
            Junction::new(
                LineStyle::UpperRightHalfDotted,
                LineStyle::LowerLeftEighth,
                LineStyle::FullDotted,
                LineStyle::ThinQuadDashed,
            ),
        ),
    ];
    for (name, junction) in junctions {
        group.bench_with_input(BenchmarkId::new("resolve", name), &junction, |b, j| {
            b.iter(|| resolve_glyph(black_box(*j)))
        });
    }
    group.finish();
}

fn bench_grid_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_build");

    for style in [LineStyle::Thin, LineStyle::Double, LineStyle::Rounded, LineStyle::Full] {
        group.bench_with_input(BenchmarkId::new("grid", format!("{style:?}")), &style, |b, s| {
            b.iter(|| black_box(*s).grid(Mask::GRID))
        });
    }

    let thin = LineStyle::Thin.grid(Mask::GRID);
    let outer = LineStyle::Thick.grid(Mask::OUTER);
    group.bench_function("combine", |b| b.iter(|| black_box(&thin).combine(black_box(&outer))));

    group.finish();
}

criterion_group!(benches, bench_resolve_exact, bench_resolve_fallback, bench_grid_build);
criterion_main!(benches);
