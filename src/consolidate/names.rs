//! Ingredient name normalization and synonym resolution
//!
//! Canonicalization is table-driven: a name is only rewritten when some
//! variant of it appears in the synonym table or the category keyword table.

use super::category::CATEGORY_KEYWORDS;

/// Known variants mapped to their canonical singular form
pub const SYNONYMS: &[(&str, &str)] = &[
    // Tomatoes
    ("roma tomato", "tomato"),
    ("cherry tomato", "tomato"),
    ("grape tomato", "tomato"),
    ("plum tomato", "tomato"),
    ("heirloom tomato", "tomato"),
    ("beefsteak tomato", "tomato"),
    ("vine tomato", "tomato"),
    // Alliums
    ("yellow onion", "onion"),
    ("white onion", "onion"),
    ("red onion", "onion"),
    ("sweet onion", "onion"),
    ("spanish onion", "onion"),
    ("green onion", "scallion"),
    ("spring onion", "scallion"),
    ("garlic clove", "garlic"),
    ("clove garlic", "garlic"),
    ("clove of garlic", "garlic"),
    ("minced garlic", "garlic"),
    // Herbs
    ("basil leaf", "basil"),
    ("sweet basil", "basil"),
    ("coriander leaf", "cilantro"),
    ("fresh coriander", "cilantro"),
    ("flat-leaf parsley", "parsley"),
    ("flat leaf parsley", "parsley"),
    ("italian parsley", "parsley"),
    // Proteins
    ("chicken breast", "chicken"),
    ("chicken thigh", "chicken"),
    ("chicken drumstick", "chicken"),
    ("whole chicken", "chicken"),
    ("ground beef", "ground beef"),
    ("minced beef", "ground beef"),
    ("beef mince", "ground beef"),
    ("prawn", "shrimp"),
    ("large egg", "egg"),
    // Oils and fats
    ("olive oil", "oil"),
    ("extra virgin olive oil", "oil"),
    ("extra-virgin olive oil", "oil"),
    ("vegetable oil", "oil"),
    ("canola oil", "oil"),
    ("sunflower oil", "oil"),
    ("unsalted butter", "butter"),
    ("salted butter", "butter"),
    // Baking
    ("all-purpose flour", "flour"),
    ("all purpose flour", "flour"),
    ("plain flour", "flour"),
    ("granulated sugar", "sugar"),
    ("white sugar", "sugar"),
    ("caster sugar", "sugar"),
    // Dairy
    ("whole milk", "milk"),
    ("skim milk", "milk"),
    ("2% milk", "milk"),
    // Peppers
    ("black pepper", "black pepper"),
    ("ground black pepper", "black pepper"),
    ("cracked black pepper", "black pepper"),
    ("red bell pepper", "bell pepper"),
    ("green bell pepper", "bell pepper"),
    ("yellow bell pepper", "bell pepper"),
    ("orange bell pepper", "bell pepper"),
    ("red pepper", "bell pepper"),
    ("green pepper", "bell pepper"),
    ("yellow pepper", "bell pepper"),
    ("orange pepper", "bell pepper"),
    ("capsicum", "bell pepper"),
    // Colored names that are different products
    ("egg white", "egg white"),
    ("egg yolk", "egg yolk"),
    ("red wine", "red wine"),
    ("white wine", "white wine"),
    ("red wine vinegar", "red wine vinegar"),
    // Produce that modifier stripping would otherwise mangle
    ("sweet potato", "sweet potato"),
    ("red pepper flakes", "red pepper flakes"),
    ("brown sugar", "brown sugar"),
    ("green bean", "green bean"),
    ("zucchini", "zucchini"),
    ("courgette", "zucchini"),
    ("aubergine", "eggplant"),
];

/// Descriptive words ignored when matching (color, freshness, size, variety, prep)
const MODIFIER_WORDS: &[&str] = &[
    "fresh", "freshly", "dried", "dry", "ripe", "organic", "raw", "cooked",
    "large", "medium", "small", "extra", "jumbo", "baby",
    "red", "yellow", "white", "green", "orange", "purple",
    "roma", "cherry", "grape", "plum", "heirloom", "vine", "sweet", "spanish",
    "chopped", "diced", "minced", "sliced", "grated", "shredded", "crushed", "ground",
    "boneless", "skinless", "bone-in", "lean", "whole", "peeled", "seedless",
    "unsalted", "salted", "virgin", "extra-virgin", "light", "dark",
];

/// Color and variety modifiers, which often name a different product
/// ("red wine", "grape juice"). Kept for the first stripping pass.
const VARIETY_WORDS: &[&str] = &[
    "red", "yellow", "white", "green", "orange", "purple",
    "roma", "cherry", "grape", "plum", "heirloom", "vine", "sweet", "spanish",
];

/// Keywords too broad to merge into once color or variety words are gone.
/// "red wine" and "white wine" must not both become "wine".
const GENERIC_HEADS: &[&str] = &[
    "pepper", "juice", "wine", "vinegar", "tea", "sauce", "broth", "stock",
];

/// Words that name a form of the ingredient rather than the ingredient
const FORM_WORDS: &[&str] = &[
    "leaf", "leaves", "clove", "cloves", "sprig", "sprigs", "stalk", "stalks",
    "head", "heads", "bunch", "bunches", "breast", "breasts", "thigh", "thighs",
    "fillet", "fillets", "filet", "filets",
];

/// Trim, lowercase and collapse internal whitespace
///
/// Whitespace-only input normalizes to an empty string.
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a name to its canonical form
///
/// Tries, in order: the normalized name, the name with prep and form words
/// removed but colors and varieties kept, then the name with every
/// descriptor removed. Each step also tries singular forms. The last step never resolves to a
/// bare generic head such as "pepper" or "juice". Falls back to the
/// normalized name when nothing in the tables matches.
pub fn canonicalize(name: &str) -> String {
    let normalized = normalize(name);
    if normalized.is_empty() {
        return normalized;
    }

    if let Some(canonical) = lookup_with_plurals(&normalized) {
        return canonical.to_string();
    }

    let trimmed = strip_descriptors(&normalized, VARIETY_WORDS);
    if !trimmed.is_empty() && trimmed != normalized {
        if let Some(canonical) = lookup_with_plurals(&trimmed) {
            return canonical.to_string();
        }
    }

    let stripped = strip_descriptors(&normalized, &[]);
    if !stripped.is_empty() && stripped != trimmed {
        if let Some(canonical) = lookup_with_plurals(&stripped) {
            if !GENERIC_HEADS.contains(&canonical) {
                return canonical.to_string();
            }
        }
    }

    normalized
}

/// Singular form of a word or phrase (last word only)
///
/// "cups" -> "cup", "pinches" -> "pinch", "berries" -> "berry"
pub fn singularize(phrase: &str) -> String {
    match phrase.rsplit_once(' ') {
        Some((head, last)) => format!("{} {}", head, singularize_word(last)),
        None => singularize_word(phrase),
    }
}

fn singularize_word(word: &str) -> String {
    if word.len() <= 3 || word.ends_with("ss") || word.ends_with("us") {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{}y", stem);
    }
    for suffix in ["ches", "shes", "sses", "xes", "zes", "oes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

/// Table lookup trying the phrase and plausible singular forms
fn lookup_with_plurals(phrase: &str) -> Option<&'static str> {
    if let Some(hit) = lookup(phrase) {
        return Some(hit);
    }
    plural_candidates(phrase).iter().find_map(|c| lookup(c))
}

fn lookup(phrase: &str) -> Option<&'static str> {
    if let Some((_, canonical)) = SYNONYMS.iter().find(|(variant, _)| *variant == phrase) {
        return Some(canonical);
    }
    if let Some((_, canonical)) = SYNONYMS.iter().find(|(_, canonical)| *canonical == phrase) {
        return Some(canonical);
    }
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == phrase)
        .map(|(keyword, _)| *keyword)
}

/// Possible singulars of the last word, most specific rule first
fn plural_candidates(phrase: &str) -> Vec<String> {
    let (head, last) = match phrase.rsplit_once(' ') {
        Some((head, last)) => (Some(head), last),
        None => (None, phrase),
    };

    let mut stems = Vec::new();
    if let Some(stem) = last.strip_suffix("ies") {
        stems.push(format!("{}y", stem));
    }
    if let Some(stem) = last.strip_suffix("ves") {
        stems.push(format!("{}f", stem));
        stems.push(format!("{}fe", stem));
    }
    if let Some(stem) = last.strip_suffix("es") {
        stems.push(stem.to_string());
    }
    if let Some(stem) = last.strip_suffix('s') {
        stems.push(stem.to_string());
    }

    stems
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(|s| match head {
            Some(h) => format!("{} {}", h, s),
            None => s,
        })
        .collect()
}

/// Remove modifier words anywhere and form words, keeping word order
/// and any word listed in `keep`
fn strip_descriptors(phrase: &str, keep: &[&str]) -> String {
    let words: Vec<&str> = phrase
        .split(' ')
        .map(|w| w.trim_matches(','))
        .filter(|w| !w.is_empty())
        .filter(|w| keep.contains(w) || !MODIFIER_WORDS.contains(w))
        .filter(|w| !FORM_WORDS.contains(w))
        .filter(|w| *w != "of")
        .collect();
    words.join(" ")
}
