use sleuth_core::report::Verdict;
use sleuth_detect::compare;
use sleuth_detect::normalize::normalize;
use sleuth_detect::sequence::structure_similarity;
use sleuth_parser::structure::ERROR_MARKER_PREFIX;
use sleuth_parser::{Language, TreeSitterParser, extract_structure};

const SORTING: &str = r"
def bubble_sort(numbers):
    n = len(numbers)
    for i in range(n):
        swapped = False
        for j in range(0, n - i - 1):
            if numbers[j] > numbers[j + 1]:
                numbers[j], numbers[j + 1] = numbers[j + 1], numbers[j]
                swapped = True
        if not swapped:
            break
    return numbers


def insertion_sort(values):
    for idx in range(1, len(values)):
        key = values[idx]
        pos = idx - 1
        while pos >= 0 and values[pos] > key:
            values[pos + 1] = values[pos]
            pos -= 1
        values[pos + 1] = key
    return values


def median(data):
    ordered = bubble_sort(list(data))
    mid = len(ordered) // 2
    if len(ordered) % 2 == 0:
        return (ordered[mid - 1] + ordered[mid]) / 2
    return ordered[mid]
";

const SORTING_RENAMED: &str = r"
def bubble_sort(items):
    count = len(items)
    for outer in range(count):
        moved = False
        for inner in range(0, count - outer - 1):
            if items[inner] > items[inner + 1]:
                items[inner], items[inner + 1] = items[inner + 1], items[inner]
                moved = True
        if not moved:
            break
    return items


def insertion_sort(seq):
    for cur in range(1, len(seq)):
        pivot = seq[cur]
        back = cur - 1
        while back >= 0 and seq[back] > pivot:
            seq[back + 1] = seq[back]
            back -= 1
        seq[back + 1] = pivot
    return seq


def median(sample):
    ranked = bubble_sort(list(sample))
    half = len(ranked) // 2
    if len(ranked) % 2 == 0:
        return (ranked[half - 1] + ranked[half]) / 2
    return ranked[half]
";

const PARSING: &str = r#"
class ConfigReader:
    """Reads key/value settings from text."""

    def __init__(self, separator="="):
        self.separator = separator
        self.entries = {}
        self.errors = []

    def feed(self, text):
        for raw in text.splitlines():
            line = raw.strip()
            if not line or line.startswith(";"):
                continue
            if self.separator not in line:
                self.errors.append("malformed: " + line)
                continue
            name, _, value = line.partition(self.separator)
            self.entries[name.strip().lower()] = self.unquote(value.strip())
        return self

    @staticmethod
    def unquote(token):
        if len(token) >= 2 and token[0] == token[-1] and token[0] in "'\"":
            return token[1:-1]
        return token

    def get(self, name, default=None):
        try:
            return self.entries[name.lower()]
        except KeyError:
            return default
"#;

#[test]
fn test_identical_sources_are_plagiarized() {
    let report = compare(SORTING, SORTING, 5);
    assert_eq!(report.hash_similarity, 100.0);
    assert_eq!(report.ast_similarity, 100.0);
    assert_eq!(report.verdict, Verdict::Plagiarized);
}

#[test]
fn test_inserted_comment_line_is_plagiarized() {
    let code1 = "def add(a, b):\n    return a + b";
    let code2 = "def add(a, b):\n    # adds two numbers\n    return a + b";
    let report = compare(code1, code2, 5);
    assert_eq!(report.hash_similarity, 100.0);
    assert_eq!(report.ast_similarity, 100.0);
    assert_eq!(report.verdict, Verdict::Plagiarized);
}

#[test]
fn test_unrelated_sources_are_original() {
    let report = compare(SORTING, PARSING, 5);
    assert!(report.hash_similarity < 5.0, "{report:?}");
    assert!(report.ast_similarity < 70.0, "{report:?}");
    assert_eq!(report.verdict, Verdict::LikelyOriginal);
}

#[test]
fn test_renaming_keeps_more_structure_than_unrelated_code() {
    let renamed = compare(SORTING, SORTING_RENAMED, 5);
    let unrelated = compare(SORTING, PARSING, 5);
    assert!(renamed.ast_similarity > unrelated.ast_similarity);
}

#[test]
fn test_syntax_error_degrades_to_marker_comparison() {
    let code1 = "def add(a, b):\n    return a + b\n";
    let code2 = "def add(a, b):\n    return (a + b\n";
    let report = compare(code1, code2, 5);

    let parser = TreeSitterParser::new(Language::Python);
    let dump1 = extract_structure(&parser, code1);
    let dump2 = extract_structure(&parser, code2);
    assert!(dump2.starts_with(ERROR_MARKER_PREFIX));
    assert!(!dump1.starts_with(ERROR_MARKER_PREFIX));
    assert_eq!(
        report.ast_similarity,
        structure_similarity(&dump1, &dump2, true)
    );
    assert!(report.ast_similarity < 70.0, "{report:?}");
    assert!((0.0..=100.0).contains(&report.hash_similarity));
}

#[test]
fn test_both_short_inputs_have_zero_hash_similarity() {
    let report = compare("x = 1", "y = 2", 5);
    assert_eq!(report.hash_similarity, 0.0);
}

#[test]
fn test_scores_bounded_and_symmetric() {
    let sources = [SORTING, SORTING_RENAMED, PARSING, "x = 1\n", "", "def broken(:\n"];
    for a in sources {
        for b in sources {
            let ab = compare(a, b, 5);
            let ba = compare(b, a, 5);
            assert!((0.0..=100.0).contains(&ab.hash_similarity));
            assert!((0.0..=100.0).contains(&ab.ast_similarity));
            assert_eq!(ab.hash_similarity, ba.hash_similarity);
            assert_eq!(ab.ast_similarity, ba.ast_similarity);
            assert_eq!(ab.verdict, ba.verdict);
        }
    }
}

#[test]
fn test_repeated_calls_are_bit_identical() {
    let first = compare(SORTING, SORTING_RENAMED, 5);
    for _ in 0..5 {
        let again = compare(SORTING, SORTING_RENAMED, 5);
        assert_eq!(
            first.hash_similarity.to_bits(),
            again.hash_similarity.to_bits()
        );
        assert_eq!(
            first.ast_similarity.to_bits(),
            again.ast_similarity.to_bits()
        );
        assert_eq!(first.verdict, again.verdict);
    }
}

#[test]
fn test_normalizer_literal_example() {
    let markers = Language::Python.line_comment_markers();
    assert_eq!(
        normalize("x = 1  # comment\n# full comment\n\ny = 2", markers),
        "x = 1  # comment\ny = 2"
    );
}

#[test]
fn test_report_serializes_like_the_upload_api() {
    let report = compare(SORTING, PARSING, 5);
    let json = serde_json::to_value(report).unwrap();
    assert!(json.get("normalized_hash_similarity").is_some());
    assert!(json.get("ast_similarity").is_some());
    assert_eq!(json["verdict"], "Likely Original");
}

#[test]
fn test_deeply_nested_upload_completes() {
    let depth = 10_000;
    let nested = format!("x = {}1{}\n", "(".repeat(depth), ")".repeat(depth));
    let report = compare(&nested, "y = 2\n", 5);
    assert!((0.0..=100.0).contains(&report.ast_similarity));
    assert_eq!(report.hash_similarity, 0.0);
}
