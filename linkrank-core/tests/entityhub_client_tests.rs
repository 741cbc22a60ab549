// linkrank-core/tests/entityhub_client_tests.rs
use mockito::Matcher;
use test_log::test;

use linkrank_core::{EntityRecord, EntityhubClient, KnowledgeBase, LinkrankError, FOAF_NAME};

const MARLEY: &str = "http://dbpedia.org/resource/Bob_Marley";

#[test]
fn test_fetches_representation() {
    let mut server = mockito::Server::new();
    let body = serde_json::json!({
        "id": MARLEY,
        "site": "dbpedia",
        "representation": {
            "id": MARLEY,
            "http://xmlns.com/foaf/0.1/name": [{ "type": "text", "xml:lang": "en", "value": "Bob Marley" }],
            "http://dbpedia.org/ontology/genre": [
                { "type": "reference", "value": "http://dbpedia.org/resource/Reggae" }
            ]
        }
    });
    let mock = server
        .mock("GET", "/entityhub/site/dbpedia/entity")
        .match_query(Matcher::UrlEncoded("id".into(), MARLEY.into()))
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create();

    let client = EntityhubClient::new(server.url()).unwrap();
    let record = client.get_entity("dbpedia", MARLEY).unwrap();

    mock.assert();
    assert_eq!(record.id(), MARLEY);
    assert_eq!(record.get_first_literal(FOAF_NAME), Some("Bob Marley"));
    assert_eq!(
        record.get_all_references("http://dbpedia.org/ontology/genre"),
        vec!["http://dbpedia.org/resource/Reggae"]
    );
}

#[test]
fn test_not_found_maps_to_entity_not_found() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/entityhub/site/dbpedia/entity")
        .match_query(Matcher::Any)
        .with_status(404)
        .create();

    let client = EntityhubClient::new(format!("{}/", server.url())).unwrap();
    let err = client.get_entity("dbpedia", "urn:missing").err().unwrap();

    assert!(matches!(
        &err,
        LinkrankError::EntityNotFound { site, entity_id } if site == "dbpedia" && entity_id == "urn:missing"
    ));
    assert!(err.is_lookup_failure());
}

#[test]
fn test_server_error_maps_to_lookup_failure() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/entityhub/site/geonames/entity")
        .match_query(Matcher::Any)
        .with_status(503)
        .create();

    let client = EntityhubClient::new(server.url()).unwrap();
    let err = client.get_entity("geonames", "urn:x").err().unwrap();

    match err {
        LinkrankError::Lookup { site, reason, .. } => {
            assert_eq!(site, "geonames");
            assert!(reason.contains("503"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_body_is_a_lookup_failure() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/entityhub/site/dbpedia/entity")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create();

    let client = EntityhubClient::new(server.url()).unwrap();
    let err = client.get_entity("dbpedia", MARLEY).err().unwrap();
    assert!(err.is_lookup_failure());
}
