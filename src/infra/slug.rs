//! Slug derivation from note titles.

use crate::domain::{MAX_SLUG_LENGTH, Slug};

/// Converts a title to a URL-friendly slug.
///
/// - Converts to lowercase
/// - Transliterates Cyrillic and accented Latin letters to ASCII
/// - Replaces whitespace with hyphens
/// - Keeps only ASCII alphanumeric characters, hyphens, and underscores
/// - Collapses consecutive hyphens
/// - Trims leading/trailing hyphens
/// - Truncates to 100 characters (at word boundary if possible)
/// - Returns "untitled" for empty results
///
/// The result depends only on the input, so deriving twice from the same
/// title always gives the same slug.
///
/// # Examples
///
/// ```
/// use notekeep::infra::slugify;
///
/// assert_eq!(slugify("API Design"), "api-design");
/// assert_eq!(slugify("Заголовок для проверки"), "zagolovok-dlya-proverki");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();

    // Transliterate and filter invalid characters
    let mut result = String::new();
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            result.push(c);
        } else if c.is_whitespace() {
            result.push('-');
        } else if let Some(latin) = transliterate(c) {
            result.push_str(latin);
        }
        // Skip all other characters
    }

    // Collapse consecutive hyphens
    let mut collapsed = String::new();
    let mut prev_was_hyphen = false;
    for c in result.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                collapsed.push(c);
            }
            prev_was_hyphen = true;
        } else {
            collapsed.push(c);
            prev_was_hyphen = false;
        }
    }

    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        return "untitled".to_string();
    }

    // Everything left is ASCII, so byte slicing is safe from here on
    if trimmed.len() <= MAX_SLUG_LENGTH {
        return trimmed.to_string();
    }

    let truncated = &trimmed[..MAX_SLUG_LENGTH];
    if let Some(last_hyphen) = truncated.rfind('-')
        && last_hyphen > MAX_SLUG_LENGTH / 2
    {
        return truncated[..last_hyphen].to_string();
    }

    truncated.trim_end_matches('-').to_string()
}

/// Derives a [`Slug`] from a title.
///
/// `slugify` only ever emits characters a `Slug` accepts, within the
/// length limit, so this cannot fail.
pub fn derive_slug(title: &str) -> Slug {
    Slug::new(&slugify(title)).expect("slugify output should always be a valid slug")
}

/// Maps a lowercase letter to its Latin spelling.
///
/// Returns `None` for characters with no mapping; those are dropped. Hard
/// and soft signs map to the empty string.
fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        // Russian
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        // Ukrainian and Belarusian
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        'ў' => "u",
        // Latin with diacritics
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ı' => "i",
        'ł' | 'ľ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'ř' => "r",
        'ś' | 'š' | 'ş' => "s",
        'ť' | 'ţ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'þ' => "th",
        'ð' => "d",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ===========================================
    // Basic Transformations
    // ===========================================

    #[test]
    fn slugify_converts_to_lowercase() {
        assert_eq!(slugify("API Design"), "api-design");
        assert_eq!(slugify("HELLO WORLD"), "hello-world");
        assert_eq!(slugify("CamelCase"), "camelcase");
    }

    #[test]
    fn slugify_replaces_whitespace_with_hyphens() {
        assert_eq!(slugify("hello world"), "hello-world");
        assert_eq!(slugify("foo\tbar\nbaz"), "foo-bar-baz");
    }

    #[test]
    fn slugify_removes_special_characters() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("foo@bar#baz"), "foobarbaz");
        assert_eq!(slugify("API: Design Notes"), "api-design-notes");
    }

    #[test]
    fn slugify_preserves_hyphens_and_underscores() {
        assert_eq!(slugify("my-title"), "my-title");
        assert_eq!(slugify("my_title"), "my_title");
    }

    #[test]
    fn slugify_collapses_and_trims_hyphens() {
        assert_eq!(slugify("foo---bar----baz"), "foo-bar-baz");
        assert_eq!(slugify("hello - world"), "hello-world");
        assert_eq!(slugify("--foo--"), "foo");
    }

    #[test]
    fn slugify_empty_string_returns_untitled() {
        assert_eq!(slugify(""), "untitled");
        assert_eq!(slugify("!@#$%"), "untitled");
        assert_eq!(slugify("日本語タイトル"), "untitled");
    }

    // ===========================================
    // Transliteration
    // ===========================================

    #[test]
    fn slugify_transliterates_russian() {
        assert_eq!(slugify("Заголовок для проверки"), "zagolovok-dlya-proverki");
        assert_eq!(slugify("Другой заголовок"), "drugoj-zagolovok");
        assert_eq!(slugify("Щука и ёж"), "schuka-i-yozh");
    }

    #[test]
    fn slugify_drops_hard_and_soft_signs() {
        assert_eq!(slugify("Подъезд"), "podezd");
        assert_eq!(slugify("Тетрадь"), "tetrad");
    }

    #[test]
    fn slugify_transliterates_ukrainian() {
        assert_eq!(slugify("Їжак і Ґанок"), "yizhak-i-ganok");
        assert_eq!(slugify("Європа"), "yevropa");
    }

    #[test]
    fn slugify_strips_latin_diacritics() {
        assert_eq!(slugify("Café Design"), "cafe-design");
        assert_eq!(slugify("Straße"), "strasse");
        assert_eq!(slugify("Łódź"), "lodz");
    }

    #[test]
    fn slugify_mixes_scripts() {
        assert_eq!(slugify("Версия 2.0 release"), "versiya-20-release");
    }

    #[test]
    fn slugify_is_deterministic() {
        for title in ["Заголовок", "Mixed Тест 42", "", "🎉 party", "a".repeat(300).as_str()] {
            assert_eq!(slugify(title), slugify(title));
        }
    }

    // ===========================================
    // Length Limit
    // ===========================================

    #[test]
    fn slugify_truncates_long_titles() {
        let long_title = "word ".repeat(40);
        let result = slugify(&long_title);
        assert!(result.len() <= MAX_SLUG_LENGTH);
        assert!(!result.ends_with('-'));
        assert!(result.starts_with("word-word"));
    }

    #[test]
    fn slugify_truncates_after_transliteration() {
        // Each щ expands to three letters
        let title = "щ".repeat(60);
        let result = slugify(&title);
        assert_eq!(result.len(), MAX_SLUG_LENGTH);
    }

    #[test]
    fn slugify_truncates_unbroken_runs() {
        let title = "x".repeat(250);
        assert_eq!(slugify(&title), "x".repeat(MAX_SLUG_LENGTH));
    }

    // ===========================================
    // derive_slug()
    // ===========================================

    #[test]
    fn derive_slug_matches_slugify() {
        let title = "Заголовок для проверки";
        assert_eq!(derive_slug(title).as_str(), slugify(title));
    }

    #[test]
    fn derive_slug_always_valid() {
        for title in ["", "   ", "Ъ", "ь-ь", "—", "日本", "x".repeat(500).as_str()] {
            let slug = derive_slug(title);
            assert!(Slug::new(slug.as_str()).is_ok());
        }
    }
}
