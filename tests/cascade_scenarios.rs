mod common;

use common::fixtures::{block_at, styled_segment};
use lesson_style::{
    BlockStyler, BoxPart, Color, EdgeInsets, FileSettingsStore, HorizontalAlignment, Palette,
    Query, ReaderSize, ReaderTheme, ReaderTypeface, StyleTemplate, Styler, TemplateKind,
    TextAlign, TextSize, ThemeContext, ThemeSnapshot,
};
use lesson_style_render::template_for;

fn light() -> ThemeSnapshot {
    ThemeSnapshot::with_theme(ReaderTheme::Light)
}

#[test]
fn fixture_heading_and_paragraph_colors() {
    let segment = styled_segment();
    let style = segment.style.as_ref();
    let heading = block_at(&segment, &[0]);
    let paragraph = block_at(&segment, &[1]);

    let styler = Styler::new(style, template_for(heading), light());
    assert_eq!(styler.template().kind, TemplateKind::Heading(2));
    assert_eq!(styler.text_color(&Query::block(heading)).to_hex(), "#ff0000");
    assert_eq!(styler.text_size(&Query::block(heading)), 25.0);

    let body = Styler::new(style, template_for(paragraph), light());
    assert_eq!(body.text_color(&Query::block(paragraph)).to_hex(), "#111111");

    let dark = Styler::new(
        style,
        template_for(paragraph),
        ThemeSnapshot::with_theme(ReaderTheme::Dark),
    );
    assert_eq!(dark.text_color(&Query::block(paragraph)), Palette::DARK.text);
}

#[test]
fn nested_list_items_follow_nested_layers() {
    let segment = styled_segment();
    let style = segment.style.as_ref();
    let styler = Styler::new(style, StyleTemplate::base(), light());

    let stray = block_at(&segment, &[4]);
    assert!(!stray.nested);
    assert_eq!(styler.text_size(&Query::block(stray)), 16.0);
    assert_eq!(
        styler.text_alignment(&Query::block(stray)),
        HorizontalAlignment::Leading
    );

    let first = block_at(&segment, &[3, 0]);
    assert!(first.nested);
    assert_eq!(styler.text_size(&Query::block(first)), 21.0);
    assert_eq!(
        styler.text_alignment(&Query::block(first)),
        HorizontalAlignment::Center
    );

    let second = block_at(&segment, &[3, 1]);
    assert_eq!(styler.text_size(&Query::block(second)), 14.0);
    assert_eq!(styler.text_color(&Query::block(second)), Color::NEUTRAL);
}

#[test]
fn blockquote_box_and_dimmed_background() {
    let segment = styled_segment();
    let style = segment.style.as_ref();
    let quote = block_at(&segment, &[2]);

    let styler = Styler::new(style, template_for(quote), light());
    let query = Query::block(quote);
    assert_eq!(
        styler.padding(&query),
        EdgeInsets {
            top: 8.0,
            leading: 16.0,
            bottom: 8.0,
            trailing: 0.0,
        }
    );
    assert_eq!(styler.corner_radius(&query), 6.0);
    assert_eq!(styler.background_color(&query).to_hex(), "#f2f2f7");

    let sepia = Styler::new(
        style,
        template_for(quote),
        ThemeSnapshot::with_theme(ReaderTheme::Sepia),
    );
    assert_eq!(
        sepia.background_color(&query),
        Palette::SEPIA.background.with_opacity(0.5)
    );
}

#[test]
fn header_templates_read_scope_styles() {
    let segment = styled_segment();
    let style = segment.style.as_ref();
    let dark = ThemeSnapshot::with_theme(ReaderTheme::Dark);

    let title = Styler::new(
        style,
        StyleTemplate::for_kind(TemplateKind::ResourceTitle),
        dark,
    );
    assert_eq!(title.text_color(&Query::new()).to_hex(), "#fefefe");
    assert_eq!(title.text_size(&Query::new()), 24.0);

    let description = Styler::new(
        style,
        StyleTemplate::for_kind(TemplateKind::ResourceDescription),
        dark,
    );
    assert_eq!(
        description.text_alignment(&Query::new()),
        HorizontalAlignment::Center
    );
    assert_eq!(description.text_color(&Query::new()), Color::WHITE);

    let segment_title = Styler::new(
        style,
        StyleTemplate::for_kind(TemplateKind::SegmentTitle),
        light(),
    );
    assert_eq!(segment_title.text_typeface(&Query::new()), "PTSerif-Bold");

    let date = Styler::new(
        style,
        StyleTemplate::for_kind(TemplateKind::SegmentDate),
        dark,
    );
    assert_eq!(date.text_size(&Query::new()), 14.0);
    assert_eq!(date.text_color(&Query::new()), Palette::DARK.secondary_text);
}

#[test]
fn story_slide_keeps_fixed_size_and_wrapper_image() {
    let segment = styled_segment();
    let style = segment.style.as_ref();
    let slide = block_at(&segment, &[5, 0]);
    let styler = Styler::new(
        style,
        template_for(slide),
        ThemeSnapshot {
            size: ReaderSize::Huge,
            ..light()
        },
    );
    let query = Query::block(slide);
    assert_eq!(styler.text_size(&query), 28.0);
    assert_eq!(
        styler.background_image(&query.on(BoxPart::Wrapper)),
        Some("https://cdn.example/slide.jpg")
    );
    assert_eq!(styler.background_image(&query), None);
}

#[test]
fn block_styler_matches_fixture_layers() {
    let segment = styled_segment();
    let blocks = segment
        .style
        .as_ref()
        .and_then(|style| style.blocks.as_ref());
    let styler = BlockStyler::new(blocks);

    let first = block_at(&segment, &[3, 0]);
    assert_eq!(styler.text_size(first, TextSize::Base), TextSize::Lg);
    assert_eq!(styler.alignment(first, TextAlign::Start), TextAlign::Center);
    let quote = block_at(&segment, &[2]);
    assert!(styler.rounded(quote, BoxPart::Block));
    assert_eq!(
        styler.background_color(quote, BoxPart::Block),
        Some(Color::rgb(0xf2, 0xf2, 0xf7))
    );
    let unknown = block_at(&segment, &[6]);
    assert_eq!(styler.text_color(unknown), Some(Color::rgb(0x11, 0x11, 0x11)));
}

#[test]
fn persisted_settings_drive_the_snapshot() {
    let mut root = std::env::temp_dir();
    root.push(format!("lesson-style-scenario-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    let store = FileSettingsStore::new(&root);

    let mut context = ThemeContext::load(&store);
    assert_eq!(context.theme(), ReaderTheme::Light);
    context.set_theme(ReaderTheme::Auto);
    context.set_size(ReaderSize::Small);
    context.set_typeface(ReaderTypeface::PtSans);

    let mut restored = ThemeContext::load(&store);
    assert_eq!(restored.size(), ReaderSize::Small);
    restored.set_platform_dark(true);
    let snapshot = restored.snapshot();
    assert!(!snapshot.is_light());

    let segment = styled_segment();
    let paragraph = block_at(&segment, &[1]);
    let styler = Styler::new(segment.style.as_ref(), template_for(paragraph), snapshot);
    assert_eq!(styler.text_color(&Query::block(paragraph)), Palette::DARK.text);
    assert_eq!(styler.text_size(&Query::block(paragraph)), 17.0);
    assert_eq!(styler.text_typeface(&Query::block(paragraph)), "PTSans-Regular");

    let _ = std::fs::remove_dir_all(root);
}
