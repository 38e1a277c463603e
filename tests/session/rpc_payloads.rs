//! Decoding of AUR RPC v5 search payloads.

use aurquery::error::SearchError;
use aurquery::logic::render;
use aurquery::sources::parse_search_response;
use aurquery::state::SortKey;

const SEARCH_BODY: &str = r#"{
  "resultcount": 3,
  "results": [
    {"Name": "yay", "Version": "12.4.2-1", "Description": "Yet another yogurt",
     "Maintainer": "jguer", "NumVotes": 2400, "Popularity": 40.123,
     "LastModified": 1730000000, "FirstSubmitted": 1475000000},
    {"Name": "yay-bin", "Version": "12.4.2-1", "Description": null,
     "Maintainer": null, "NumVotes": 600, "Popularity": 9.5,
     "LastModified": 1731000000, "FirstSubmitted": 1480000000},
    {"Name": "", "NumVotes": 1, "Popularity": 0,
     "LastModified": 0, "FirstSubmitted": 0}
  ],
  "type": "search",
  "version": 5
}"#;

#[test]
/// What: A search payload decodes in endpoint order, nameless records dropped
///
/// - Input: Three results, one without a name
/// - Output: Two records; orphan has no maintainer; orderable by every key
fn search_payload_decodes() {
    let records = parse_search_response(SEARCH_BODY).expect("valid payload");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "yay");
    assert_eq!(records[0].maintainer_name(), Some("jguer"));
    assert_eq!(records[1].maintainer_name(), None);
    for key in SortKey::ALL {
        assert_eq!(render(&records, key).expect("orderable").len(), 2);
    }
    let by_updated = render(&records, SortKey::ByLastUpdated).expect("orderable");
    assert_eq!(by_updated[0].name, "yay-bin");
}

#[test]
/// What: Error envelopes and garbage map to their error kinds
///
/// - Input: `type: error` envelope; non-JSON body
/// - Output: `Endpoint` with the text; `Transport`
fn error_payloads_classified() {
    let body = r#"{"error":"Query arg too small.","resultcount":0,"results":[],"type":"error","version":5}"#;
    assert_eq!(
        parse_search_response(body),
        Err(SearchError::Endpoint("Query arg too small.".into()))
    );
    assert!(matches!(
        parse_search_response("<html>502</html>"),
        Err(SearchError::Transport(_))
    ));
}
