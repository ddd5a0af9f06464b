use crate::Tag;

#[allow(clippy::float_cmp)]
mod de;


mod roundtrip;

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
            assert_eq!(Tag::try_from($val as u8).unwrap(), Tag::$tag);
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
    }

    for value in 12..=u8::MAX {
        assert!(Tag::try_from(value).is_err())
    }
}

#[test]
fn tag_names_parse_both_ways() {
    assert_eq!(Tag::End.name(), "TAG_End");
    assert_eq!(Tag::ByteArray.name(), "TAG_Byte_Array");
    assert_eq!(Tag::IntArray.name(), "TAG_Int_Array");
    assert_eq!(Tag::Compound.to_string(), "TAG_Compound");

    for tag in [
        Tag::End,
        Tag::Byte,
        Tag::Short,
        Tag::Int,
        Tag::Long,
        Tag::Float,
        Tag::Double,
        Tag::ByteArray,
        Tag::String,
        Tag::List,
        Tag::Compound,
        Tag::IntArray,
    ] {
        assert_eq!(tag.name().parse::<Tag>().unwrap(), tag);
    }

    // The 13th tag type from newer game versions does not exist here.
    assert!("TAG_Long_Array".parse::<Tag>().is_err());
    assert!("garbage".parse::<Tag>().is_err());
}
