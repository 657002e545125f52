//! Conformance tests for the two supported TOML grammar revisions.

use toml_doc::{Dialect, Document, Error, StringKind, Value};

fn v03(text: &str) -> Document {
    Document::parse(text, Dialect::V03).unwrap()
}

fn v04(text: &str) -> Document {
    Document::parse(text, Dialect::V04).unwrap()
}

fn int_at(doc: &Document, key: &str) -> Option<i64> {
    doc.root().get_value(key).and_then(Value::as_integer)
}

#[test]
fn digit_grouping_is_v04_only() {
    assert_eq!(int_at(&v04("a = 1_2_3"), "a"), Some(123));

    let err = Document::parse("a = 1_2_3", Dialect::V03).unwrap_err();
    assert!(matches!(err, Error::Format { .. }));
}

#[test]
fn inline_tables_are_v04_only() {
    let doc = v04("point = { x = 1, y = 2 }");
    let point = doc.root().get_value("point").unwrap();
    assert!(point.is_inline_table());

    assert!(Document::parse("point = { x = 1 }", Dialect::V03).is_err());
}

#[test]
fn escaped_solidus_is_v03_only() {
    let doc = v03(r#"path = "a\/b""#);
    assert_eq!(
        doc.root().get_value("path").and_then(Value::as_str),
        Some("a/b")
    );

    assert!(Document::parse(r#"path = "a\/b""#, Dialect::V04).is_err());
}

#[test]
fn duplicate_table_declaration_is_rejected() {
    let err = Document::parse("[a.b]\nx = 1\n[a.b]\ny = 2\n", Dialect::V04).unwrap_err();
    assert!(matches!(err, Error::Structural(_)));
}

#[test]
fn array_of_tables_continuation() {
    let doc = v04("[[x]]\nk = 1\n[[x]]\nk = 2\n");
    let x = doc
        .root()
        .get_value("x")
        .and_then(Value::as_array_of_tables)
        .unwrap();
    assert_eq!(x.len(), 2);
    let ks: Vec<_> = x
        .iter()
        .map(|node| {
            node.as_table()
                .and_then(|t| t.get_value("k"))
                .and_then(Value::as_integer)
                .unwrap()
        })
        .collect();
    assert_eq!(ks, vec![1, 2]);
}

#[test]
fn concrete_document_shape() {
    let doc = v04("title = \"x\"\n[a]\nb = 1\n[[a.c]]\nd = 2\n[[a.c]]\nd = 3\n");

    assert_eq!(
        doc.root().get_value("title").and_then(Value::as_str),
        Some("x")
    );
    let a = doc.root().get_value("a").and_then(Value::as_table).unwrap();
    assert_eq!(a.get_value("b").and_then(Value::as_integer), Some(1));
    let c = a.get_value("c").and_then(Value::as_array_of_tables).unwrap();
    let ds: Vec<_> = c
        .iter()
        .map(|node| {
            node.as_table()
                .and_then(|t| t.get_value("d"))
                .and_then(Value::as_integer)
                .unwrap()
        })
        .collect();
    assert_eq!(ds, vec![2, 3]);
}

#[test]
fn error_position_points_at_the_stray_token() {
    let err = Document::parse("number = 3.14  pi <--again forgot the #", Dialect::V04)
        .unwrap_err();
    // the `pi` token, not the start of the line
    assert_eq!(err.position(), Some((1, 16)));
}

#[test]
fn scalars_precede_subtables_on_write() {
    // sub-table declared first in the tree; the scalar still leads
    let mut doc = Document::new();
    let mut sub = toml_doc::Table::new();
    sub.insert("inner", Value::from(1));
    doc.root_mut().insert("sub", Value::Table(sub));
    doc.root_mut().insert("scalar", Value::from(2));

    let out = doc.to_string(Dialect::V04).unwrap();
    let scalar_at = out.find("scalar = 2").unwrap();
    let header_at = out.find("[sub]").unwrap();
    assert!(scalar_at < header_at);
}

#[test]
fn string_forms() {
    let doc = v04(concat!(
        "basic = \"a\\tb\"\n",
        "literal = 'C:\\net'\n",
        "ml = \"\"\"\nline one\nline two\"\"\"\n",
        "mll = '''\nraw \\n here\n'''\n",
    ));
    let root = doc.root();
    assert_eq!(root.get_value("basic").and_then(Value::as_str), Some("a\tb"));
    assert_eq!(
        root.get_value("literal").and_then(Value::as_str),
        Some("C:\\net")
    );
    assert_eq!(
        root.get_value("ml").and_then(Value::as_str),
        Some("line one\nline two")
    );
    assert_eq!(
        root.get_value("mll").and_then(Value::as_str),
        Some("raw \\n here\n")
    );

    match root.get_value("literal") {
        Some(Value::String { kind, .. }) => assert_eq!(*kind, StringKind::Literal),
        other => panic!("expected string, got {other:?}"),
    }
}

#[test]
fn line_continuation_in_multiline_basic() {
    let doc = v04("s = \"\"\"one \\\n      two\"\"\"\n");
    assert_eq!(doc.root().get_value("s").and_then(Value::as_str), Some("one two"));
}

#[test]
fn raw_newline_in_single_line_string_is_an_error() {
    assert!(Document::parse("s = \"one\ntwo\"", Dialect::V04).is_err());
    assert!(Document::parse("s = 'one\ntwo'", Dialect::V04).is_err());
}

#[test]
fn mixed_arrays_are_rejected_at_the_offending_element() {
    let err = Document::parse("a = [1, 2, \"three\"]", Dialect::V04).unwrap_err();
    assert_eq!(err.position(), Some((1, 12)));

    // nested depth does not matter
    assert!(Document::parse("a = [[1], [\"x\"], [2]]", Dialect::V04).is_ok());
    assert!(Document::parse("a = [[1], 2]", Dialect::V04).is_err());
}

#[test]
fn arrays_allow_newlines_comments_and_trailing_commas() {
    let doc = v04("a = [\n  1, # one\n  2,\n]\n");
    let arr = doc.root().get_value("a").and_then(Value::as_array).unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr.items()[0].comments_after(), &[" one".to_string()]);
}

#[test]
fn v04_arrays_may_hold_inline_tables() {
    let doc = v04("points = [{ x = 1 }, { x = 2 }]");
    let arr = doc
        .root()
        .get_value("points")
        .and_then(Value::as_array)
        .unwrap();
    assert_eq!(arr.len(), 2);
    assert!(arr.get(0).unwrap().is_inline_table());

    // and they cannot be written back under v0.3
    assert!(doc.to_string(Dialect::V03).is_err());
}

#[test]
fn datetimes_normalize_to_utc_z() {
    let doc = v04("a = 1979-05-27T07:32:00Z\nb = 1979-05-27T00:32:00-07:00\nc = 1979-05-27T07:32:00.555Z\n");
    let out = doc.to_string(Dialect::V04).unwrap();
    assert_eq!(
        out,
        "a = 1979-05-27T07:32:00Z\nb = 1979-05-27T07:32:00Z\nc = 1979-05-27T07:32:00Z\n"
    );
}

#[test]
fn datetime_is_tried_before_integer() {
    let doc = v04("when = 2024-06-01T12:00:00Z\ncount = 2024\n");
    assert!(doc.root().get_value("when").unwrap().is_datetime());
    assert_eq!(int_at(&doc, "count"), Some(2024));
}

#[test]
fn keys_quote_per_dialect_on_write() {
    let doc = v04("\"two words\" = 1\n");
    assert_eq!(
        doc.to_string(Dialect::V04).unwrap(),
        "\"two words\" = 1\n"
    );
    assert!(doc.to_string(Dialect::V03).is_err());

    // v0.3 keys can hold characters v0.4 would reject bare
    let doc = v03("key?! = 1\n");
    assert_eq!(doc.to_string(Dialect::V03).unwrap(), "key?! = 1\n");
}

#[test]
fn quoted_header_segments_are_v04_only() {
    let doc = v04("[servers.\"bay.area\"]\nip = 1\n");
    let servers = doc
        .root()
        .get_value("servers")
        .and_then(Value::as_table)
        .unwrap();
    assert!(servers.contains_key("bay.area"));

    // the round trip re-quotes the dotted segment
    let out = doc.to_string(Dialect::V04).unwrap();
    assert!(out.contains("[servers.\"bay.area\"]"));
    assert!(doc.to_string(Dialect::V03).is_err());
}

#[test]
fn nan_and_infinity_cannot_serialize() {
    let mut doc = Document::new();
    doc.root_mut().insert("x", Value::Float(f64::NAN));
    let err = doc.to_string(Dialect::V04).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[test]
fn exponent_floats() {
    let doc = v04("a = 5e3\nb = 1.5e-2\nc = 3.0\n");
    assert_eq!(
        doc.root().get_value("a").and_then(Value::as_float),
        Some(5000.0)
    );
    assert_eq!(
        doc.root().get_value("b").and_then(Value::as_float),
        Some(0.015)
    );
    // floats keep a decimal point on write
    let out = doc.to_string(Dialect::V04).unwrap();
    assert!(out.contains("a = 5000.0"));
    assert!(out.contains("c = 3.0"));
}

#[test]
fn premature_end_of_input() {
    assert!(Document::parse("s = \"unterminated", Dialect::V04).is_err());
    assert!(Document::parse("a = [1, 2", Dialect::V04).is_err());
    assert!(Document::parse("[table", Dialect::V04).is_err());
}

#[test]
fn comment_only_documents() {
    let doc = v04("# just a comment\n");
    assert!(doc.root().is_empty());
    assert_eq!(
        doc.root().trailing_comments(),
        &[" just a comment".to_string()]
    );
    assert_eq!(doc.to_string(Dialect::V04).unwrap(), "# just a comment\n");
}

#[test]
fn document_round_trip_is_identity_for_both_dialects() {
    let samples_v04 = [
        "a = 1\n",
        "a = [1, 2, 3]\n",
        "s = 'literal'\n[t]\nk = \"v\"\n",
        "# c\na = true # t\n[[x]]\nk = 1\n[[x]]\nk = 2\n",
        "p = {x = 1, y = \"two\"}\n",
        "n = 1_000\n",
    ];
    for text in samples_v04 {
        let doc = Document::parse(text, Dialect::V04).unwrap();
        let out = doc.to_string(Dialect::V04).unwrap();
        let again = Document::parse(&out, Dialect::V04).unwrap();
        assert_eq!(doc, again, "round trip changed {text:?} -> {out:?}");
    }

    let samples_v03 = ["a = 1\nodd.key = 2\n", "s = \"a\\/b\"\n[t]\nk = 1\n"];
    for text in samples_v03 {
        let doc = Document::parse(text, Dialect::V03).unwrap();
        let out = doc.to_string(Dialect::V03).unwrap();
        let again = Document::parse(&out, Dialect::V03).unwrap();
        assert_eq!(doc, again, "round trip changed {text:?} -> {out:?}");
    }
}
