#![allow(dead_code)]

use std::path::PathBuf;

use lesson_style::{AnyBlock, Segment};

pub const STYLED_SEGMENT_FIXTURE: &str = "tests/fixtures/segment-styled.json";

pub fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push(name);
    path
}

pub fn styled_segment() -> Segment {
    let path = fixture_path(STYLED_SEGMENT_FIXTURE);
    let json = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read {}: {}", path.display(), e));
    Segment::from_json_str(&json).unwrap_or_else(|e| panic!("decode {}: {}", path.display(), e))
}

/// Block at `index`, then child at each following index.
pub fn block_at<'a>(segment: &'a Segment, path: &[usize]) -> &'a AnyBlock {
    let (first, rest) = path.split_first().expect("block path should not be empty");
    rest.iter()
        .fold(&segment.blocks[*first], |block, idx| &block.children()[*idx])
}

/// Every block in document order, depth first.
pub fn walk(segment: &Segment) -> Vec<&AnyBlock> {
    fn push<'a>(block: &'a AnyBlock, out: &mut Vec<&'a AnyBlock>) {
        out.push(block);
        for child in block.children() {
            push(child, out);
        }
    }
    let mut out = Vec::new();
    for block in &segment.blocks {
        push(block, &mut out);
    }
    out
}
