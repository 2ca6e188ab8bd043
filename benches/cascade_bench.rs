use std::hint::black_box;
use std::time::Instant;

use lesson_style::{
    AnyBlock, BlockStyler, BoxPart, Query, ReaderTheme, Segment, Styler, TextAlign, TextSize,
    ThemeSnapshot,
};
use lesson_style_render::{render_block_text, template_for, FontResolver, TextRun};

const FIXTURE: &str = "tests/fixtures/segment-styled.json";

struct CaseResult {
    case: &'static str,
    iterations: usize,
    min_ns: u128,
    median_ns: u128,
    max_ns: u128,
}

fn run_case<F>(case: &'static str, warmup_iters: usize, measure_iters: usize, mut op: F) -> CaseResult
where
    F: FnMut() -> usize,
{
    for _ in 0..warmup_iters {
        black_box(op());
    }
    let mut samples: Vec<u128> = (0..measure_iters)
        .map(|_| {
            let start = Instant::now();
            black_box(op());
            start.elapsed().as_nanos()
        })
        .collect();
    samples.sort_unstable();
    CaseResult {
        case,
        iterations: measure_iters,
        min_ns: samples[0],
        median_ns: samples[samples.len() / 2],
        max_ns: samples[samples.len() - 1],
    }
}

fn flatten(blocks: &[AnyBlock], out: &mut Vec<AnyBlock>) {
    for block in blocks {
        out.push(block.clone());
        flatten(block.children(), out);
    }
}

fn main() {
    let quick = std::env::var_os("LESSON_STYLE_BENCH_QUICK").is_some();
    let warmup_iters = if quick { 2 } else { 20 };
    let measure_iters = if quick { 10 } else { 200 };
    println!("# lesson-style cascade benchmark");
    println!(
        "# mode={} warmup_iters={} measure_iters={}",
        if quick { "quick" } else { "full" },
        warmup_iters,
        measure_iters
    );

    let json = std::fs::read_to_string(FIXTURE).unwrap_or_else(|e| panic!("read {}: {}", FIXTURE, e));
    let segment = Segment::from_json_str(&json).unwrap_or_else(|e| panic!("decode {}: {}", FIXTURE, e));
    let style = segment.style.as_ref();
    let mut blocks = Vec::new();
    flatten(&segment.blocks, &mut blocks);
    let fonts = FontResolver::default();
    let runs = [
        TextRun::plain("Read "),
        TextRun::plain("this").emphasized(),
        TextRun::link("link", "https://example.org"),
    ];

    let mut results = Vec::new();
    results.push(run_case("decode_segment", warmup_iters, measure_iters, || {
        Segment::from_json_str(&json).map_or(0, |s| s.blocks.len())
    }));
    for theme in [ReaderTheme::Light, ReaderTheme::Dark] {
        let snapshot = ThemeSnapshot::with_theme(theme);
        let case = if theme == ReaderTheme::Light {
            "resolve_scalars_light"
        } else {
            "resolve_scalars_dark"
        };
        results.push(run_case(case, warmup_iters, measure_iters, || {
            let mut n = 0usize;
            for block in &blocks {
                let styler = Styler::new(style, template_for(block), snapshot);
                let query = Query::block(block);
                n += styler.text_size(&query) as usize;
                n += styler.text_color(&query).r as usize;
                n += styler.padding(&query.on(BoxPart::Wrapper)).top as usize;
                n += styler.corner_radius(&query) as usize;
            }
            n
        }));
    }
    results.push(run_case("block_styler", warmup_iters, measure_iters, || {
        let helper = BlockStyler::new(style.and_then(|s| s.blocks.as_ref()));
        blocks
            .iter()
            .filter(|block| {
                helper.alignment(*block, TextAlign::Start) == TextAlign::Center
                    || helper.text_size(*block, TextSize::Base) == TextSize::Lg
            })
            .count()
    }));
    results.push(run_case("render_block_text", warmup_iters, measure_iters, || {
        blocks
            .iter()
            .map(|block| {
                let styler = Styler::new(style, template_for(block), ThemeSnapshot::default());
                render_block_text(&styler, &fonts, block, &runs, None).runs.len()
            })
            .sum()
    }));

    println!("case,iterations,min_ns,median_ns,max_ns");
    for r in results {
        println!(
            "{},{},{},{},{}",
            r.case, r.iterations, r.min_ns, r.median_ns, r.max_ns
        );
    }
}
