//! Property tests for FIM prompt assembly

use fim_bench::prompt::{
    insert_line, DatasetRow, PromptAssembler, FILE_SEPARATOR_TOKEN, MIDDLE_TOKEN, PREFIX_TOKEN,
    SUFFIX_TOKEN,
};
use proptest::prelude::*;

const MARKER: &str = "<MARK>";

fn source_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z ;{}()=]{0,12}", 1..20)
}

proptest! {
    #[test]
    fn marker_lands_on_requested_line(
        (lines, line_no) in source_lines().prop_flat_map(|lines| {
            let count = lines.len() as i64;
            (Just(lines), 1..=count)
        }),
    ) {
        let original = lines.join("\n");
        let out = insert_line(&original, MARKER, line_no).unwrap();

        let out_lines: Vec<&str> = out.split('\n').collect();
        prop_assert_eq!(out_lines.len(), lines.len() + 1);
        prop_assert_eq!(out_lines[(line_no - 1) as usize], MARKER);
    }

    #[test]
    fn removing_marker_restores_original(
        (lines, line_no) in source_lines().prop_flat_map(|lines| {
            let count = lines.len() as i64;
            (Just(lines), 1..=count)
        }),
    ) {
        let original = lines.join("\n");
        let out = insert_line(&original, MARKER, line_no).unwrap();

        let restored = out.replacen(&format!("{}\n", MARKER), "", 1);
        prop_assert_eq!(restored, original);
    }

    #[test]
    fn one_past_end_appends(lines in source_lines()) {
        let original = lines.join("\n");
        let out = insert_line(&original, MARKER, lines.len() as i64 + 1).unwrap();
        prop_assert_eq!(out, format!("{}{}", original, MARKER));
    }

    #[test]
    fn out_of_range_rejected(lines in source_lines(), past in 2i64..50, below in 0i64..50) {
        let original = lines.join("\n");
        let count = lines.len() as i64;

        prop_assert!(insert_line(&original, MARKER, count + past).is_err());
        prop_assert!(insert_line(&original, MARKER, -below).is_err());
    }

    #[test]
    fn assembled_prompt_is_framed(
        (lines, line_no) in source_lines().prop_flat_map(|lines| {
            let count = lines.len() as i64;
            (Just(lines), 1..=count + 1)
        }),
    ) {
        let row = DatasetRow::new(lines.join("\n"), line_no);
        let prompt = PromptAssembler::new().assemble(&row).unwrap();

        let head = format!("{}\n{}", FILE_SEPARATOR_TOKEN, PREFIX_TOKEN);
        prop_assert!(prompt.starts_with(&head));
        prop_assert!(prompt.ends_with(MIDDLE_TOKEN));
        prop_assert_eq!(prompt.matches(SUFFIX_TOKEN).count(), 1);
    }
}
