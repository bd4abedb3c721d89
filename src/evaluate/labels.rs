/// Display labels keyed by exact category id.
const LABELS: &[(&str, &str)] = &[
    ("alimentari", "Alimentari"),
    ("bevande", "Bevande"),
    ("utilita", "Utilità"),
    ("manutenzioni", "Manutenzioni"),
    ("marketing", "Marketing"),
    ("licenze", "Licenze e assicurazioni"),
    ("commissioni", "Commissioni"),
    ("lavanderia", "Lavanderia"),
    ("pulizia", "Pulizia"),
    ("spese-varie", "Spese varie"),
    ("varie", "Varie"),
    ("amministrazione", "Amministrazione"),
    ("staff-cucina", "Staff cucina"),
    ("staff-sala", "Staff sala"),
    ("staff-lavapiatti", "Staff lavapiatti"),
    ("staff-pulizie", "Staff pulizie"),
    ("canone", "Canone e/o Mutuo"),
    ("finanziamento1", "Finanziamento 1"),
    ("finanziamento2", "Finanziamento 2"),
];

/// Human-readable label for a category id. Unknown ids fall back to the
/// raw id with `-`/`_` turned into spaces; either way the result is
/// title-cased.
pub(crate) fn category_label(id: &str) -> String {
    let base = LABELS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| id.replace(['-', '_'], " "));
    title_case(&base)
}

/// Upper-case the first character of every word, leaving the rest as is.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = is_word;
    }
    out
}
