use std::path::Path;

use colored::Colorize;

use hoard_core::{Category, Rank, Slot, Subrank};
use hoard_roller::{RollRequest, roll};

use crate::render::render_name;

#[allow(clippy::too_many_arguments)]
pub fn run(
    data: &Path,
    what: &[String],
    slot: Option<&str>,
    class: Option<String>,
    base: Option<String>,
    count: u32,
    seed: Option<u64>,
) -> Result<(), String> {
    let tables = super::load_tables(data)?;
    let book = super::open_spellbook(data)?;
    let mut rng = super::make_rng(seed);

    let mut request = parse_words(what)?;
    if let Some(slot) = slot {
        request.slot = Some(Slot::parse(slot).map_err(|e| e.to_string())?);
    }
    request.class = class;
    request.base_name = base;

    for _ in 0..count {
        let item = roll(&tables, &mut rng, &request).map_err(|e| e.to_string())?;
        let name = render_name(&item, &tables, &book, &mut rng)?;
        match item.cost {
            Some(cost) => println!("  {} {}", name.bold(), format!("({cost} gp)").dimmed()),
            None => println!("  {}", name.bold()),
        }
    }

    Ok(())
}

/// Parse free-order rank/subrank/category/slot words into a request.
fn parse_words(words: &[String]) -> Result<RollRequest, String> {
    let mut request = RollRequest::default();
    for word in words {
        if let Ok(rank) = Rank::parse(word) {
            request.rank = Some(rank);
        } else if let Ok(subrank) = Subrank::parse(word) {
            request.subrank = Some(subrank);
        } else if let Ok(category) = Category::parse(word) {
            request.category = Some(category);
        } else if let Ok(slot) = Slot::parse(word) {
            request.slot = Some(slot);
        } else {
            return Err(format!(
                "\"{word}\" is not a rank, subrank, category, or slot"
            ));
        }
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_parse_in_any_order() {
        let words = vec![
            "wondrous".to_string(),
            "minor".to_string(),
            "lesser".to_string(),
        ];
        let request = parse_words(&words).unwrap();
        assert_eq!(request.rank, Some(Rank::Minor));
        assert_eq!(request.subrank, Some(Subrank::Lesser));
        assert_eq!(request.category, Some(Category::Wondrous));
    }

    #[test]
    fn slot_words_are_recognized() {
        let words = vec!["headband".to_string()];
        let request = parse_words(&words).unwrap();
        assert_eq!(request.slot, Some(Slot::Headband));
    }

    #[test]
    fn no_words_means_fully_random() {
        let request = parse_words(&[]).unwrap();
        assert_eq!(request, RollRequest::default());
    }

    #[test]
    fn unknown_word_is_rejected_with_context() {
        let words = vec!["legendary".to_string()];
        let err = parse_words(&words).unwrap_err();
        assert!(err.contains("legendary"));
    }
}
