use anyhow::Result;
use rune_bidi::{Bidi, BidiLevel};
use rune_config::RuneConfig;

/// Print levels, runs and visual order for a few mixed-direction strings.
///
/// Run with: cargo run -p rune-bidi --example visual_order [text]
fn main() -> Result<()> {
    let config = RuneConfig::load();

    let mut logger = env_logger::Builder::from_default_env();
    if let Some(filter) = config.logging.filter.as_deref() {
        logger.parse_filters(filter);
    }
    let _ = logger.try_init();

    let bidi = Bidi::from_config(&config.bidi);
    let samples: Vec<String> = match std::env::args().nth(1) {
        Some(text) => vec![text],
        None => vec![
            "he said \"שלום\" to me".to_string(),
            "אב cd ef".to_string(),
            "\u{0627}\u{0644}\u{0639}\u{062F}\u{062F} 123 (test)".to_string(),
            "first line\nשורה שנייה".to_string(),
        ],
    };

    for text in &samples {
        let info = bidi.for_text(text, None);
        println!("Text: {:?}", text);
        println!("Paragraphs: {}", info.paragraph_count());

        for para in info.paragraphs() {
            let levels: Vec<u8> = para.levels().iter().map(|l| l.number()).collect();
            println!(
                "  [{}..{}] base level {} ({:?})",
                para.range_start(),
                para.range_end(),
                para.base_level(),
                para.direction()
            );
            println!("    levels: {:?}", levels);

            for run in para.visual_runs(para.range_start(), para.range_end())? {
                println!(
                    "    run {:?} level {} {:?}",
                    run.range,
                    run.level,
                    &text[run.range.clone()]
                );
            }

            let visual = para.reorder_line_text(para.range_start(), para.range_end())?;
            println!("    visual: {:?}", visual);
        }
        println!();
    }

    let levels = [0, 0, 1, 1, 2, 2, 1, 0].map(BidiLevel::new);
    let levels: Vec<BidiLevel> = levels.into_iter().collect::<Result<_, _>>()?;
    println!("reorder_visual({:?}) = {:?}", levels, Bidi::reorder_visual(&levels));

    Ok(())
}
