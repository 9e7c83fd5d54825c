//! Finite name and color pools with generated fallbacks

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::polity::state::{State, Union};

pub const STATE_NAMES: &[&str] = &[
    "Aldoria", "Belmark", "Corvany", "Drevona", "Eswick", "Fenholm", "Galbria", "Hadria",
    "Iskadia", "Jorvia", "Kestovia", "Lurania", "Morvale", "Nessany", "Ostrelia", "Pyrland",
    "Quessia", "Ruvonia", "Sertalia", "Tivona", "Umbria", "Valmark", "Wrenholm", "Ysenia",
    "Zerova", "Arbeth", "Bravantia", "Cindria", "Dolwick", "Elstany", "Faldonia", "Gresmark",
    "Hestovia", "Ivermoor", "Kaldria", "Lomheim", "Madrieth", "Norvania", "Ophalia", "Pendoria",
    "Rostheim", "Selwick", "Tarnovia", "Ulvaria", "Vendria", "Weshaven", "Ystrad", "Zalmore",
    "Ardwick", "Balemoor", "Cressany", "Durholm", "Ethria", "Folcania", "Grendovia", "Halveth",
    "Ingria", "Karvale", "Lestrany", "Merrowick", "Navonia", "Orsheim", "Pellovia", "Tresmark",
];

pub const UNION_NAMES: &[&str] = &[
    "Accord of Vellin", "Amber League", "Concord of Talvane", "Eastern Compact",
    "Everfold Pact", "Free Crowns", "Grand Covenant", "Harrow League",
    "Iron Concord", "Larkspur Pact", "League of Meridia", "Northern Accord",
    "Old Coast Compact", "Pale Banner League", "Pact of Ostrand", "Quiet Concord",
    "Redwater League", "Sable Compact", "Silverway Pact", "Southern Covenant",
    "Sunmark Accord", "Tarn League", "Twin River Pact", "Veldt Compact",
    "Verdant League", "Violet Accord", "Wardens' Pact", "Westmere League",
    "White Harbor Accord", "Windfall Compact", "Wold Concord", "Zephyr League",
];

/// Fifty high-contrast colors for state rendering
pub const CONTRAST_COLORS: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3",
    "#808000", "#ffd8b1", "#000075", "#808080", "#ffe0b3", "#ff7f00", "#8dd3c7", "#fb8072",
    "#80b1d3", "#fdb462", "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
    "#1f78b4", "#33a02c", "#e31a1c", "#ff69b4", "#b15928", "#6a3d9a", "#b2df8a", "#cab2d6",
    "#a6cee3", "#999999", "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f",
    "#e5c494", "#b3b3b3",
];

const NAME_PREFIXES: &[&str] = &[
    "Ald", "Bran", "Cael", "Dorn", "Eld", "Frey", "Grim", "Hal", "Isen", "Kael", "Mor", "Tor",
    "Vel", "Zan",
];

const NAME_SUFFIXES: &[&str] = &[
    "mark", "ford", "heim", "dale", "wick", "tonia", "bury", "vale", "gate", "ia",
];

/// Shuffled copy of the state name pool
pub fn shuffled_state_names(rng: &mut ChaCha8Rng) -> Vec<&'static str> {
    let mut names = STATE_NAMES.to_vec();
    names.shuffle(rng);
    names
}

/// Shuffled copy of the color palette
pub fn shuffled_colors(rng: &mut ChaCha8Rng) -> Vec<&'static str> {
    let mut colors = CONTRAST_COLORS.to_vec();
    colors.shuffle(rng);
    colors
}

/// Generated placeholder name, used once the pool runs dry
pub fn generated_name(rng: &mut ChaCha8Rng) -> String {
    let prefix = NAME_PREFIXES[rng.gen_range(0..NAME_PREFIXES.len())];
    let suffix = NAME_SUFFIXES[rng.gen_range(0..NAME_SUFFIXES.len())];
    format!("{}{}", prefix, suffix)
}

/// Random pool name not carried by any live state, or a generated fallback
pub fn unused_state_name(states: &[State], rng: &mut ChaCha8Rng) -> String {
    let available: Vec<&&str> = STATE_NAMES
        .iter()
        .filter(|name| !states.iter().any(|s| s.name == **name))
        .collect();
    match available.choose(rng) {
        Some(name) => (**name).to_string(),
        None => generated_name(rng),
    }
}

/// First pool name not carried by any existing union, or a generated fallback
pub fn next_union_name(unions: &[Union], rng: &mut ChaCha8Rng) -> String {
    UNION_NAMES
        .iter()
        .find(|name| !unions.iter().any(|u| u.name == **name))
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| format!("{} Union", generated_name(rng)))
}

/// Random palette color
pub fn random_color(rng: &mut ChaCha8Rng) -> String {
    CONTRAST_COLORS[rng.gen_range(0..CONTRAST_COLORS.len())].to_string()
}

/// Random palette color not worn by any live state, or a generated fallback
pub fn unused_color(states: &[State], rng: &mut ChaCha8Rng) -> String {
    let available: Vec<&str> = CONTRAST_COLORS
        .iter()
        .copied()
        .filter(|color| !states.iter().any(|s| s.color == *color))
        .collect();
    match available.choose(rng) {
        Some(color) => (*color).to_string(),
        None => random_hex_color(rng),
    }
}

/// Generated fallback color
pub fn random_hex_color(rng: &mut ChaCha8Rng) -> String {
    format!("#{:06x}", rng.gen_range(0..0x100_0000))
}
