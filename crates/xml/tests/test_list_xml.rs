use muninn_archive::{ChatList, ResultSetPage};
use muninn_xml::{CodecError, FromXml, Result, XmlTokens, from_xml_str, to_xml_string};

#[test]
fn test_decode_plain_list_without_paging() -> Result<()> {
    let xml = "<list xmlns='urn:xmpp:archive'>\
               <chat with='a@b' start='2024-01-01T00:00:00Z'/>\
               <chat with='c@d' start='2024-01-02T00:00:00Z'/>\
               </list>";
    let list: ChatList = from_xml_str(xml)?;

    assert_eq!(list.len(), 2);
    assert_eq!(list.chats[0].with, "a@b");
    assert_eq!(list.chats[0].start, "2024-01-01T00:00:00Z");
    assert_eq!(list.chats[1].with, "c@d");
    assert_eq!(list.chats[1].start, "2024-01-02T00:00:00Z");
    assert!(list.paging.is_none());
    Ok(())
}

#[test]
fn test_decode_list_with_paging() -> Result<()> {
    let xml = "<list xmlns='urn:xmpp:archive'>\
               <chat with='a@b' start='2024-01-01T00:00:00Z'/>\
               <set xmlns='http://jabber.org/protocol/rsm'>\
               <first index='3'>hash-3</first>\
               <last>hash-7</last>\
               <count>40</count>\
               </set></list>";
    let list: ChatList = from_xml_str(xml)?;

    assert_eq!(list.len(), 1);
    let page = list.paging.expect("paging should be present");
    assert_eq!(page.first_index, 3);
    assert_eq!(page.first, "hash-3");
    assert_eq!(page.last, "hash-7");
    // the server-side total is independent of the rows on this page
    assert_eq!(page.count, 40);
    Ok(())
}

#[test]
fn test_decode_list_preserves_duplicates_and_order() -> Result<()> {
    let xml = "<list xmlns='urn:xmpp:archive'>\
               <chat with='a@b' start='s1'/>\
               <chat with='a@b' start='s1'/>\
               <chat with='z@z' start='s0'/>\
               </list>";
    let list: ChatList = from_xml_str(xml)?;

    assert_eq!(list.len(), 3);
    assert_eq!(list.chats[0], list.chats[1]);
    assert_eq!(list.chats[2].with, "z@z");
    Ok(())
}

#[test]
fn test_decode_list_rejects_partial_paging() {
    let xml = "<list xmlns='urn:xmpp:archive'>\
               <set xmlns='http://jabber.org/protocol/rsm'>\
               <first index='0'>a</first>\
               <last>b</last>\
               </set></list>";
    let err = from_xml_str::<ChatList>(xml).unwrap_err();
    assert!(matches!(err, CodecError::Protocol { .. }), "{err}");
}

#[test]
fn test_decode_list_rejects_non_numeric_index_and_count() {
    let xml = "<list xmlns='urn:xmpp:archive'>\
               <set xmlns='http://jabber.org/protocol/rsm'>\
               <first index='soon'>a</first><last>b</last><count>1</count>\
               </set></list>";
    assert!(matches!(
        from_xml_str::<ChatList>(xml).unwrap_err(),
        CodecError::Format { field: "index", .. }
    ));

    let xml = "<list xmlns='urn:xmpp:archive'>\
               <set xmlns='http://jabber.org/protocol/rsm'>\
               <first index='0'>a</first><last>b</last><count>many</count>\
               </set></list>";
    assert!(matches!(
        from_xml_str::<ChatList>(xml).unwrap_err(),
        CodecError::Format { field: "count", .. }
    ));
}

#[test]
fn test_decode_list_rejects_chat_without_attributes() {
    let xml = "<list xmlns='urn:xmpp:archive'><chat/></list>";
    assert!(matches!(
        from_xml_str::<ChatList>(xml).unwrap_err(),
        CodecError::Protocol { .. }
    ));

    let xml = "<list xmlns='urn:xmpp:archive'><chat with='a@b'/></list>";
    assert!(matches!(
        from_xml_str::<ChatList>(xml).unwrap_err(),
        CodecError::Protocol { .. }
    ));
}

#[test]
fn test_decode_list_rejects_wrong_root_or_namespace() {
    let err = from_xml_str::<ChatList>("<chats xmlns='urn:xmpp:archive'/>").unwrap_err();
    assert!(matches!(err, CodecError::Protocol { .. }));

    let err = from_xml_str::<ChatList>("<list xmlns='urn:xmpp:other'/>").unwrap_err();
    assert!(matches!(err, CodecError::Protocol { .. }));
}

#[test]
fn test_decode_list_propagates_truncated_input() {
    let xml = "<list xmlns='urn:xmpp:archive'><chat with='a@b' start='s'/>";
    let err = from_xml_str::<ChatList>(xml).unwrap_err();
    assert!(
        matches!(err, CodecError::Protocol { .. } | CodecError::Xml(_)),
        "{err}"
    );
}

#[test]
fn test_decode_list_embedded_in_an_outer_stanza() -> Result<()> {
    // a decoder entered mid-stream stops exactly at its own end tag
    let xml = "<iq type='result'>\
               <list xmlns='urn:xmpp:archive'>\
               <chat with='a@b' start='s'/>\
               </list></iq>";
    let mut tokens = XmlTokens::from_str(xml);
    tokens.skip_to_start()?; // <iq>
    tokens.skip_to_start()?; // <list>
    let start_depth = tokens.depth();
    assert_eq!(start_depth, 2);

    let list = ChatList::decode(&mut tokens, start_depth)?;
    assert_eq!(list.len(), 1);

    // cursor rests on </list>; the outer parser can keep going
    assert_eq!(tokens.local_name(), Some("list"));
    assert_eq!(tokens.depth(), start_depth);
    Ok(())
}

#[test]
fn test_decode_requires_entry_on_a_start_tag() {
    let mut tokens = XmlTokens::from_str("<list xmlns='urn:xmpp:archive'/>");
    // cursor never positioned on the element
    let err = ChatList::decode(&mut tokens, 0).unwrap_err();
    assert!(matches!(err, CodecError::Protocol { .. }));
}

#[test]
fn test_encode_unpaged_list_uses_the_empty_shorthand() -> Result<()> {
    let mut list = ChatList::new();
    // rows without paging are dropped: the shorthand is a bare element
    list.push_chat("a@b", "2024-01-01T00:00:00Z");
    let xml = to_xml_string(&list)?;
    assert_eq!(xml, "<list xmlns=\"urn:xmpp:archive\"/>");
    Ok(())
}

#[test]
fn test_encode_paged_list_layout() -> Result<()> {
    let mut list = ChatList::new();
    list.push_chat("a@b", "2024-01-01T00:00:00Z");
    list.push_chat("c@d", "2024-01-02T00:00:00Z");
    list.paging = Some(ResultSetPage::new(0, "k1", "k9", 42));

    let xml = to_xml_string(&list)?;
    assert_eq!(
        xml,
        "<list xmlns=\"urn:xmpp:archive\">\
         <chat xmlns=\"urn:xmpp:archive\" with=\"a@b\" start=\"2024-01-01T00:00:00Z\"/>\
         <chat xmlns=\"urn:xmpp:archive\" with=\"c@d\" start=\"2024-01-02T00:00:00Z\"/>\
         <set xmlns=\"http://jabber.org/protocol/rsm\">\
         <first index=\"0\">k1</first>\
         <last>k9</last>\
         <count>42</count>\
         </set></list>"
    );
    Ok(())
}
