use crate::{Document, Node};

/// The single individual `P1` with a name and a dated birth.
pub fn sample_document() -> Document {
    Document::new().add_individual(
        "P1",
        [
            Node::name("Elliot /Chance/"),
            Node::birth("").with_children([Node::date("6 MAY 1989")]),
        ],
    )
}

/// An individual as exported by Ancestry, five levels deep, citing a source
/// in each of the five given places.
pub fn ancestry_individual(sources: [&str; 5]) -> String {
    let census = "Year: 1930; Census Place: Bronx, Bronx, New York; Page: 42A; Enumeration District: 0430; FHL microfilm: 2341213";

    [
        "0 @I152151456706@ INDI".to_string(),
        "1 NAME Jacob /Yourow/".into(),
        "2 GIVN Jacob".into(),
        "2 SURN Yourow".into(),
        format!("2 SOUR {}", sources[0]),
        "3 PAGE New York City Municipal Archives; New York, New York; Borough: Manhattan; Volume Number: 13".into(),
        "3 _APID 1,61406::6159341".into(),
        format!("2 SOUR {}", sources[1]),
        format!("3 PAGE {census}"),
        "3 _APID 1,6224::30826480".into(),
        "1 SEX M".into(),
        "1 FAMS @F89@".into(),
        "1 BIRT".into(),
        "2 DATE abt 1888".into(),
        "2 PLAC Russia".into(),
        format!("2 SOUR {}", sources[2]),
        format!("3 PAGE {census}"),
        "3 _APID 1,6224::30826480".into(),
        "1 EVEN".into(),
        "2 TYPE Arrival".into(),
        "2 DATE 1905".into(),
        format!("2 SOUR {}", sources[3]),
        format!("3 PAGE {census}"),
        "3 _APID 1,6224::30826480".into(),
        "1 RESI Marital Status: Married; Relation to Head: Head".into(),
        "2 DATE 1930".into(),
        "2 PLAC Bronx, Bronx, New York, USA".into(),
        format!("2 SOUR {}", sources[4]),
        format!("3 PAGE {census}"),
        "3 _APID 1,6224::30826480".into(),
    ]
    .join("\n")
}

pub fn ancestry_document(sources: [&str; 5]) -> Document {
    ancestry_individual(sources)
        .parse()
        .expect("ancestry fixture parses")
}

/// A single `NOTE` chain nested `levels` deep, one node per level.
pub fn deep_chain(levels: usize) -> String {
    (0..levels).map(|depth| format!("{depth} NOTE x\n")).collect()
}

#[test]
fn ancestry_fixture_shape() {
    let document = ancestry_document(["@S1@", "@S2@", "@S3@", "@S4@", "@S5@"]);
    assert_eq!(document.len(), 1);

    let indi = document.individuals().next().expect("one individual");
    assert_eq!(indi.pointer(), "I152151456706");
    assert_eq!(indi.name().map(|n| n.surname()), Some("Yourow"));
    assert_eq!(document.iter().count(), 30);
    assert_eq!(document.iter().map(|n| n.depth()).max(), Some(3));
}
