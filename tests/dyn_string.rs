// DynString integration suite.
//
// Core invariant exercised: after every operation the stored bytes end in
// exactly one trailing 0 that is not counted by len().
use pocket_collections::DynString;

fn terminated(s: &DynString) -> bool {
    s.as_bytes_with_nul().split_last() == Some((&0, s.as_bytes()))
}

// Test: building a sentence out of pieces.
// Assumes: append, concat, insert and erase all go through the array.
// Verifies: the final text and the terminator.
#[test]
fn compose_sentence() {
    let mut s: DynString = "Hello".parse().unwrap();
    let world = DynString::try_from(" World").unwrap();
    s.concat(&world).unwrap();
    assert_eq!(s, "Hello World");
    s.append_str("!").unwrap();
    assert_eq!(s, "Hello World!");
    s.insert(5, b',').unwrap();
    assert_eq!(s.to_str(), Ok("Hello, World!"));
    assert_eq!(s.erase(5), Some(b','));
    assert_eq!(s.len(), 12);
    assert!(terminated(&s));
}

// Test: erase ends.
// Assumes: "abcd".
// Verifies: first and last bytes can be erased and the terminator stays.
#[test]
fn erase_first_and_last() {
    let mut s: DynString = "abcd".parse().unwrap();
    assert_eq!(s.erase(0), Some(b'a'));
    assert_eq!(s, "bcd");
    assert_eq!(s.erase(2), Some(b'd'));
    assert_eq!(s, "bc");
    assert!(terminated(&s));
}

// Test: push and pop to empty.
// Assumes: an empty string.
// Verifies: pop stops at empty and the string is reusable afterwards.
#[test]
fn push_pop_round() {
    let mut s = DynString::new();
    for b in *b"ABC" {
        s.push(b).unwrap();
    }
    assert_eq!(s, "ABC");
    while s.pop().is_some() {}
    assert!(s.is_empty());
    assert!(terminated(&s));
    s.append_str("again").unwrap();
    assert_eq!(s.to_string(), "again");
}

// Test: sorting.
// Assumes: byte-wise order.
// Verifies: a list of strings sorts like &str would.
#[test]
fn sorts_like_str() {
    let words = ["pear", "Apple", "apple", "app", ""];
    let mut strings: Vec<DynString> = words.iter().map(|w| w.parse().unwrap()).collect();
    strings.sort();
    let mut expected = words.to_vec();
    expected.sort();
    let sorted: Vec<String> = strings.iter().map(|s| s.to_string()).collect();
    assert_eq!(sorted, expected);
}
