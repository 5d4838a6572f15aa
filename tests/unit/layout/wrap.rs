use super::*;

fn wrap(text: &str, max_width: f32) -> Vec<String> {
    wrap_text(text, max_width, FixedAdvance::new(10.0))
}

#[test]
fn empty_text_yields_one_empty_line() {
    assert_eq!(wrap("", 100.0), vec![String::new()]);
}

#[test]
fn text_that_fits_stays_on_one_line() {
    assert_eq!(wrap("Hello World", 920.0), vec!["Hello World".to_string()]);
}

#[test]
fn greedy_fill_breaks_between_words() {
    // 10px per char: "aaa bbb" = 70px fits in 75, "aaa bbb ccc" = 110px does not.
    assert_eq!(
        wrap("aaa bbb ccc dd", 75.0),
        vec!["aaa bbb".to_string(), "ccc dd".to_string()]
    );
}

#[test]
fn over_wide_word_is_never_split() {
    assert_eq!(
        wrap("supercalifragilistic", 50.0),
        vec!["supercalifragilistic".to_string()]
    );
    assert_eq!(
        wrap("a supercalifragilistic b", 50.0),
        vec![
            "a".to_string(),
            "supercalifragilistic".to_string(),
            "b".to_string()
        ]
    );
}

#[test]
fn exact_width_does_not_break() {
    assert_eq!(wrap("ab cd", 50.0), vec!["ab cd".to_string()]);
}

#[test]
fn every_line_fits_unless_it_is_a_single_word() {
    let text = "the quick brown fox jumps over the lazy dog again and again";
    for max in [30.0f32, 60.0, 95.0, 140.0, 300.0] {
        let lines = wrap(text, max);
        assert!(!lines.is_empty());
        for l in &lines {
            assert!(l.chars().count() as f32 * 10.0 <= max || !l.contains(' '));
        }
        assert_eq!(lines.join(" "), text);
    }
}

#[test]
fn measurer_can_be_borrowed_mutably() {
    struct Counting(usize);
    impl TextMeasurer for Counting {
        fn measure(&mut self, text: &str) -> f32 {
            self.0 += 1;
            text.len() as f32
        }
    }

    let mut m = Counting(0);
    let lines = wrap_text("a b c", 100.0, &mut m);
    assert_eq!(lines, vec!["a b c".to_string()]);
    // The first word is adopted without measuring.
    assert_eq!(m.0, 2);
}
