use crate::model::effect::EffectBundle;

/// Scan arbitrary text for bracketed stat tags and sum them up.
///
/// A tag is `[` optional sign, spaces, digits, spaces, unit `]` where the
/// unit is HP, Gold, ATK or Attack in any casing. Both the narrator's story
/// text and option labels are semi-trusted free text, so anything inside
/// brackets that does not match is skipped rather than reported.
pub fn parse_effects(text: &str) -> EffectBundle {
    let mut fx = EffectBundle::default();

    let mut rest = text;
    while let Some(start) = rest.find('[') {
        let after = &rest[start + 1..];
        let Some(end) = after.find(']') else {
            break;
        };

        let mut inner = &after[..end];
        // A stray '[' before the closing bracket: only the innermost
        // bracket pair can be a tag.
        if let Some(nested) = inner.rfind('[') {
            inner = &inner[nested + 1..];
        }

        if let Some((unit, delta)) = parse_tag(inner) {
            // Saturate rather than overflow: huge magnitudes are still
            // well-formed tags and must never panic the parse.
            match unit {
                StatUnit::Hp => fx.hp = fx.hp.saturating_add(delta),
                StatUnit::Gold => fx.gold = fx.gold.saturating_add(delta),
                StatUnit::Attack => fx.attack = fx.attack.saturating_add(delta),
            }
        }

        rest = &after[end + 1..];
    }

    fx
}

enum StatUnit {
    Hp,
    Gold,
    Attack,
}

fn parse_tag(inner: &str) -> Option<(StatUnit, i32)> {
    let inner = inner.trim();

    let (sign, rest) = match inner.strip_prefix('+') {
        Some(rest) => (1, rest),
        None => match inner.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, inner),
        },
    };

    let rest = rest.trim_start();
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i32 = rest[..digits_end].parse().ok()?;
    let unit = parse_unit(rest[digits_end..].trim())?;

    Some((unit, sign * magnitude))
}

fn parse_unit(word: &str) -> Option<StatUnit> {
    if word.eq_ignore_ascii_case("hp") {
        Some(StatUnit::Hp)
    } else if word.eq_ignore_ascii_case("gold") {
        Some(StatUnit::Gold)
    } else if word.eq_ignore_ascii_case("atk") || word.eq_ignore_ascii_case("attack") {
        Some(StatUnit::Attack)
    } else {
        None
    }
}
