use muninn_archive::{ListQuery, RetrieveQuery};
use muninn_xml::{Result, to_xml_string};

#[test]
fn test_unfiltered_list_query_is_a_bare_element() -> Result<()> {
    let xml = to_xml_string(&ListQuery::new())?;
    assert_eq!(xml, "<list xmlns=\"urn:xmpp:archive\"/>");
    Ok(())
}

#[test]
fn test_list_query_with_filters_and_page_size() -> Result<()> {
    let query = ListQuery {
        with: Some("mary@example.com".to_string()),
        start: Some("2024-01-01T00:00:00Z".to_string()),
        end: Some("2024-02-01T00:00:00Z".to_string()),
        max: Some(30),
    };
    let xml = to_xml_string(&query)?;
    assert_eq!(
        xml,
        "<list xmlns=\"urn:xmpp:archive\" with=\"mary@example.com\" \
         start=\"2024-01-01T00:00:00Z\" end=\"2024-02-01T00:00:00Z\">\
         <set xmlns=\"http://jabber.org/protocol/rsm\"><max>30</max></set>\
         </list>"
    );
    Ok(())
}

#[test]
fn test_list_query_for_peer() -> Result<()> {
    let xml = to_xml_string(&ListQuery::for_peer("a@b"))?;
    assert_eq!(xml, "<list xmlns=\"urn:xmpp:archive\" with=\"a@b\"/>");
    Ok(())
}

#[test]
fn test_retrieve_query_without_page_size() -> Result<()> {
    let query = RetrieveQuery::new("mary@example.com", "2024-03-02T14:00:00Z");
    let xml = to_xml_string(&query)?;
    assert_eq!(
        xml,
        "<retrieve xmlns=\"urn:xmpp:archive\" with=\"mary@example.com\" \
         start=\"2024-03-02T14:00:00Z\"/>"
    );
    Ok(())
}

#[test]
fn test_retrieve_query_with_page_size() -> Result<()> {
    let mut query = RetrieveQuery::new("mary@example.com", "2024-03-02T14:00:00Z");
    query.max = Some(100);
    let xml = to_xml_string(&query)?;
    assert_eq!(
        xml,
        "<retrieve xmlns=\"urn:xmpp:archive\" with=\"mary@example.com\" \
         start=\"2024-03-02T14:00:00Z\">\
         <set xmlns=\"http://jabber.org/protocol/rsm\"><max>100</max></set>\
         </retrieve>"
    );
    Ok(())
}
