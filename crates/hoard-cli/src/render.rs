//! Item name rendering.
//!
//! A rolled item's name is a template with two placeholder kinds:
//! `{key:NAME}` / `{key:NAME:SUBKEY}` draws a string from the template
//! key tables, and `{spell}` resolves the item's spell request against
//! the spell index. Substitution runs in two passes because a key
//! expansion may itself introduce another placeholder.

use rand::rngs::StdRng;

use hoard_core::{RolledItem, SpellRequest};
use hoard_spells::{ClassSelector, Spellbook};
use hoard_tables::Tables;

/// Passes of placeholder substitution; an expansion introduced by the
/// first pass is resolved by the second.
const RENDER_PASSES: u32 = 2;

/// Render an item's name template into display text.
pub fn render_name(
    item: &RolledItem,
    tables: &Tables,
    book: &Spellbook,
    rng: &mut StdRng,
) -> Result<String, String> {
    let mut name = item.name.clone();
    for _ in 0..RENDER_PASSES {
        if !name.contains('{') {
            break;
        }
        name = substitute(&name, item.spell.as_ref(), tables, book, rng)?;
    }
    Ok(name)
}

/// One substitution pass over every placeholder in the template.
fn substitute(
    template: &str,
    spell: Option<&SpellRequest>,
    tables: &Tables,
    book: &Spellbook,
    rng: &mut StdRng,
) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let (before, tail) = rest.split_at(start);
        out.push_str(before);
        let Some(end) = tail.find('}') else {
            return Err(format!("unterminated placeholder in \"{template}\""));
        };
        let inner = &tail[1..end];
        out.push_str(&expand(inner, spell, tables, book, rng)?);
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Expand one placeholder body.
fn expand(
    inner: &str,
    spell: Option<&SpellRequest>,
    tables: &Tables,
    book: &Spellbook,
    rng: &mut StdRng,
) -> Result<String, String> {
    if inner == "spell" {
        return expand_spell(spell, book, rng);
    }
    if let Some(key_body) = inner.strip_prefix("key:") {
        let (key, subkey) = match key_body.split_once(':') {
            Some((key, subkey)) => (key, Some(subkey)),
            None => (key_body, None),
        };
        return tables
            .keys
            .random(rng, key, subkey)
            .map_err(|e| e.to_string());
    }
    Err(format!("unknown placeholder \"{{{inner}}}\""))
}

/// Resolve the spell placeholder through the index.
fn expand_spell(
    spell: Option<&SpellRequest>,
    book: &Spellbook,
    rng: &mut StdRng,
) -> Result<String, String> {
    let request = spell.cloned().unwrap_or_default();
    let selector = request
        .class
        .as_deref()
        .map_or_else(ClassSelector::default, ClassSelector::parse);
    let pick = book
        .random(rng, request.level, &selector, request.tag.as_deref())
        .map_err(|e| e.to_string())?;
    Ok(format!(
        "{} ({} {}, CL {})",
        pick.name, pick.class, pick.level, pick.caster_level
    ))
}
