use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;

thread_local! {
    static COLLATOR: Option<Collator> =
        Collator::try_new(&locale!("zh").into(), CollatorOptions::new()).ok();
}

// Collator ties fall back to byte order so the sort stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collated(a, b).then_with(|| a.cmp(b))
}

fn collated(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        names.sort_by(|a, b| compare_names(a, b));
        names
    }

    #[test]
    fn case_does_not_dominate_letters() {
        assert_eq!(
            sorted(&["banana.txt", "Apple.txt", "cherry.txt"]),
            vec!["Apple.txt", "banana.txt", "cherry.txt"]
        );
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_tie() {
        assert_eq!(sorted(&["Readme", "readme"]), vec!["readme", "Readme"]);
    }

    #[test]
    fn accents_are_secondary() {
        assert_eq!(
            sorted(&["resumes", "résumé", "resume"]),
            vec!["resume", "résumé", "resumes"]
        );
    }

    #[test]
    fn punctuation_precedes_digits_and_han_sorts_by_pinyin() {
        assert_eq!(
            sorted(&["1file", "_init", "中文", "安装"]),
            vec!["_init", "1file", "安装", "中文"]
        );
        assert_eq!(
            sorted(&["中文", "报告", "安装"]),
            vec!["安装", "报告", "中文"]
        );
    }

    #[test]
    fn composed_and_decomposed_forms_collate_equal() {
        assert_eq!(collated("caf\u{e9}", "cafe\u{301}"), Ordering::Equal);
        assert_ne!(compare_names("caf\u{e9}", "cafe\u{301}"), Ordering::Equal);
    }
}
