//! Spoken-number tables: cardinals, ordinals, month names and spoken years,
//! mapped to the digit strings the recognizer or editor would write instead.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Language;

static GERMAN: LazyLock<HashMap<String, String>> = LazyLock::new(german_table);
static ENGLISH: LazyLock<HashMap<String, String>> = LazyLock::new(english_table);

/// Digit form of a normalized spoken-number word, if it is one
pub fn lookup(language: Language, word: &str) -> Option<&'static str> {
    let table: &'static HashMap<String, String> = match language {
        Language::German => &GERMAN,
        Language::English => &ENGLISH,
    };
    table.get(word).map(String::as_str)
}

const DE_UNITS: [&str; 20] = [
    "null", "eins", "zwei", "drei", "vier", "fünf", "sechs", "sieben", "acht", "neun", "zehn",
    "elf", "zwölf", "dreizehn", "vierzehn", "fünfzehn", "sechzehn", "siebzehn", "achtzehn",
    "neunzehn",
];

const DE_TENS: [&str; 10] = [
    "", "", "zwanzig", "dreißig", "vierzig", "fünfzig", "sechzig", "siebzig", "achtzig", "neunzig",
];

const DE_MONTHS: [&[&str]; 12] = [
    &["januar", "jänner"],
    &["februar", "feber"],
    &["märz", "maerz"],
    &["april"],
    &["mai"],
    &["juni"],
    &["juli"],
    &["august"],
    &["september"],
    &["oktober"],
    &["november"],
    &["dezember"],
];

/// Declension endings of a German ordinal stem ("achtzehnt" + "en")
const DE_ORDINAL_ENDINGS: [&str; 5] = ["e", "en", "er", "es", "em"];

/// German cardinal for 0..=99 ("einundzwanzig")
fn german_cardinal(n: u32) -> String {
    if n < 20 {
        return DE_UNITS[n as usize].to_string();
    }
    let (tens, unit) = ((n / 10) as usize, (n % 10) as usize);
    match unit {
        0 => DE_TENS[tens].to_string(),
        1 => format!("einund{}", DE_TENS[tens]),
        _ => format!("{}und{}", DE_UNITS[unit], DE_TENS[tens]),
    }
}

/// German ordinal stem for 1..=99 ("erst", "dritt", "zwanzigst")
fn german_ordinal_stem(n: u32) -> String {
    match n {
        1 => "erst".to_string(),
        3 => "dritt".to_string(),
        7 => "siebt".to_string(),
        8 => "acht".to_string(),
        n if n < 20 => format!("{}t", german_cardinal(n)),
        n => format!("{}st", german_cardinal(n)),
    }
}

fn insert_german(table: &mut HashMap<String, String>, word: String, digits: String) {
    // "dreißig" is also written "dreissig"
    if word.contains('ß') {
        table.insert(word.replace('ß', "ss"), digits.clone());
    }
    table.insert(word, digits);
}

fn german_table() -> HashMap<String, String> {
    let mut table = HashMap::new();

    for n in 0..100 {
        insert_german(&mut table, german_cardinal(n), n.to_string());
    }
    table.insert("hundert".to_string(), "100".to_string());
    table.insert("einhundert".to_string(), "100".to_string());

    for n in 1..100 {
        let stem = german_ordinal_stem(n);
        for ending in DE_ORDINAL_ENDINGS {
            insert_german(&mut table, format!("{stem}{ending}"), n.to_string());
        }
    }
    for ending in DE_ORDINAL_ENDINGS {
        table.insert(format!("siebent{ending}"), "7".to_string());
    }

    for (i, names) in DE_MONTHS.iter().enumerate() {
        for name in *names {
            table.insert(name.to_string(), format!("{:02}", i + 1));
        }
    }

    // Spoken years of the dates that show up in reports
    for year in 1900..2000u32 {
        let rest = year % 100;
        let word = match rest {
            0 => "neunzehnhundert".to_string(),
            _ => format!("neunzehnhundert{}", german_cardinal(rest)),
        };
        insert_german(&mut table, word, year.to_string());
    }
    for year in 2000..2100u32 {
        let rest = year % 100;
        let word = match rest {
            0 => "zweitausend".to_string(),
            _ => format!("zweitausend{}", german_cardinal(rest)),
        };
        insert_german(&mut table, word, year.to_string());
    }

    table
}

const EN_UNITS: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const EN_TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const EN_ORDINAL_UNITS: [&str; 20] = [
    "zeroth", "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
    "ninth", "tenth", "eleventh", "twelfth", "thirteenth", "fourteenth", "fifteenth",
    "sixteenth", "seventeenth", "eighteenth", "nineteenth",
];

const EN_MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

fn english_cardinal(n: u32) -> String {
    if n < 20 {
        return EN_UNITS[n as usize].to_string();
    }
    let (tens, unit) = ((n / 10) as usize, (n % 10) as usize);
    match unit {
        0 => EN_TENS[tens].to_string(),
        _ => format!("{}-{}", EN_TENS[tens], EN_UNITS[unit]),
    }
}

fn english_ordinal(n: u32) -> String {
    if n < 20 {
        return EN_ORDINAL_UNITS[n as usize].to_string();
    }
    let (tens, unit) = ((n / 10) as usize, (n % 10) as usize);
    match unit {
        // "twenty" → "twentieth"
        0 => format!("{}ieth", EN_TENS[tens].trim_end_matches('y')),
        _ => format!("{}-{}", EN_TENS[tens], EN_ORDINAL_UNITS[unit]),
    }
}

fn english_table() -> HashMap<String, String> {
    let mut table = HashMap::new();

    for n in 0..100 {
        table.insert(english_cardinal(n), n.to_string());
    }
    table.insert("hundred".to_string(), "100".to_string());

    for n in 1..100 {
        table.insert(english_ordinal(n), n.to_string());
    }
    // "a second" is a unit of time; compounds like "forty-second" stay
    table.remove("second");

    // "may" is also a verb; only unambiguous month names are translated
    for (i, name) in EN_MONTHS.iter().enumerate() {
        if *name != "may" {
            table.insert(name.to_string(), format!("{:02}", i + 1));
        }
    }

    table
}
