use muninn_archive::{ChatList, Direction, ResultSetPage, Transcript};
use muninn_xml::{Result, from_xml_str, to_xml_string};

#[test]
fn test_list_decode_encode_decode_is_stable() -> Result<()> {
    // count is the server-side total: larger than the page on purpose
    let xml = "<list xmlns='urn:xmpp:archive'>\
               <chat with='a@b' start='2024-01-01T00:00:00Z'/>\
               <chat with='c@d' start='2024-01-02T00:00:00Z'/>\
               <chat with='a@b' start='2024-01-03T00:00:00Z'/>\
               <set xmlns='http://jabber.org/protocol/rsm'>\
               <first index='10'>hash-10</first>\
               <last>hash-12</last>\
               <count>97</count>\
               </set></list>";
    let decoded: ChatList = from_xml_str(xml)?;
    let encoded = to_xml_string(&decoded)?;
    let again: ChatList = from_xml_str(&encoded)?;

    assert_eq!(decoded, again);
    assert_eq!(again.len(), 3);
    assert_eq!(again.paging.as_ref().map(|p| p.count), Some(97));
    Ok(())
}

#[test]
fn test_transcript_decode_encode_decode_is_stable() -> Result<()> {
    let xml = "<chat xmlns='urn:xmpp:archive' with='mary@example.com' \
               start='2024-03-02T14:00:00Z' subject='plans' version='5'>\
               <from secs='0'><body>hello</body></from>\
               <to secs='4'><body>fish &amp; chips?</body></to>\
               <set xmlns='http://jabber.org/protocol/rsm'>\
               <first xmlns='http://jabber.org/protocol/rsm' index='2'>m2</first>\
               <last xmlns='http://jabber.org/protocol/rsm'>m3</last>\
               <count xmlns='http://jabber.org/protocol/rsm'>9</count>\
               </set></chat>";
    let decoded: Transcript = from_xml_str(xml)?;
    let encoded = to_xml_string(&decoded)?;
    let again: Transcript = from_xml_str(&encoded)?;

    assert_eq!(decoded, again);
    assert_eq!(again.messages[1].body, "fish & chips?");
    assert_eq!(again.version, 5);
    Ok(())
}

#[test]
fn test_encode_is_idempotent_on_own_output() -> Result<()> {
    let mut list = ChatList::new();
    list.push_chat("a@b", "2024-01-01T00:00:00Z");
    list.paging = Some(ResultSetPage::new(0, "k0", "k0", 1));

    let first = to_xml_string(&list)?;
    let reparsed: ChatList = from_xml_str(&first)?;
    let second = to_xml_string(&reparsed)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_unpaged_entities_round_trip_to_the_shorthand() -> Result<()> {
    let list = ChatList::new();
    let reparsed: ChatList = from_xml_str(&to_xml_string(&list)?)?;
    assert_eq!(list, reparsed);

    let transcript = Transcript::new("a@b", "2024-01-01T00:00:00Z");
    let reparsed: Transcript = from_xml_str(&to_xml_string(&transcript)?)?;
    assert_eq!(transcript, reparsed);
    Ok(())
}

#[test]
fn test_escaped_content_survives_both_directions() -> Result<()> {
    let mut transcript = Transcript::new("a@b", "2024-01-01T00:00:00Z");
    transcript.subject = Some("plans & <schemes>".to_string());
    transcript.push_message(Direction::Outgoing, 7, "1 < 2 && 3 > 2");
    transcript.paging = Some(ResultSetPage::new(0, "m0", "m0", 1));

    let encoded = to_xml_string(&transcript)?;
    assert!(!encoded.contains("&&"), "ampersands must be escaped: {encoded}");

    let again: Transcript = from_xml_str(&encoded)?;
    assert_eq!(again.subject.as_deref(), Some("plans & <schemes>"));
    assert_eq!(again.messages[0].body, "1 < 2 && 3 > 2");
    Ok(())
}
