//! Wire enums and their string codec.
//!
//! # Design
//! Every enum is declared once through `wire_enum!`, which emits the enum,
//! a static `(variant, wire string)` table and the `Display`, `FromStr`,
//! `Serialize` and `Deserialize` impls that read from that table. Decoding a
//! string that is not in the table fails with `Error::UnknownEnumValue`;
//! there is no catch-all variant.

use crate::error::Error;

/// Static mapping between an enum and its wire representation.
pub trait WireEnum: Sized + Copy + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;

    /// Every variant with its wire string, in declaration order.
    const VARIANTS: &'static [(Self, &'static str)];

    fn as_str(&self) -> &'static str;

    fn from_wire(value: &str) -> Result<Self, Error> {
        Self::VARIANTS
            .iter()
            .find(|(_, wire)| *wire == value)
            .map(|(variant, _)| *variant)
            .ok_or_else(|| Error::UnknownEnumValue {
                enum_name: Self::NAME,
                value: value.to_string(),
            })
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::enums::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [(Self, &'static str)] = &[ $( ($name::$variant, $wire) ),+ ];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<$name as $crate::enums::WireEnum>::as_str(self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as $crate::enums::WireEnum>::from_wire(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(<$name as $crate::enums::WireEnum>::as_str(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::enums::WireEnum>::from_wire(&value).map_err(::serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Who may retrieve playback URLs for a resource.
    #[derive(Default)]
    AccessPolicy {
        #[default]
        Public => "public",
        Private => "private",
        Drm => "drm",
    }
}

wire_enum! {
    /// On-demand rendition resolution.
    Resolution {
        R2160p => "2160p",
        R1440p => "1440p",
        R1080p => "1080p",
        R720p => "720p",
        R480p => "480p",
        R360p => "360p",
    }
}

wire_enum! {
    /// Maximum ingest resolution of a live stream.
    LiveResolution {
        R1080p => "1080p",
        R720p => "720p",
        R480p => "480p",
    }
}

wire_enum! {
    /// Language of a subtitle track.
    LanguageCode {
        En => "en",
        It => "it",
        Pl => "pl",
        Es => "es",
        Fr => "fr",
        Ru => "ru",
        Nl => "nl",
    }
}

wire_enum! {
    /// Fallback decision of a domain or user-agent restriction list.
    DefaultPolicy {
        Allow => "allow",
        Deny => "deny",
    }
}

wire_enum! {
    /// Sort direction for `orderBy` on list operations.
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

wire_enum! {
    /// Static MP4 rendition generation.
    Mp4Support {
        None => "none",
        Capped4k => "capped_4k",
        AudioOnly => "audioOnly",
        AudioOnlyCapped4k => "audioOnly,capped_4k",
    }
}

wire_enum! {
    MediaQuality {
        Standard => "standard",
        Premium => "premium",
    }
}

wire_enum! {
    /// Visibility of the recording produced by a live stream.
    MediaPolicy {
        Public => "public",
        Private => "private",
    }
}

wire_enum! {
    /// Whether playlist membership is curated by hand or by filter.
    PlaylistMode {
        Manual => "manual",
        Smart => "smart",
    }
}

wire_enum! {
    PlayOrder {
        CreatedDateAsc => "createdDate ASC",
        CreatedDateDesc => "createdDate DESC",
    }
}

wire_enum! {
    /// Which tracks content moderation inspects.
    ModerationType {
        Video => "video",
        Audio => "audio",
        AudioVideo => "av",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trips<E>()
    where
        E: WireEnum + PartialEq + std::fmt::Debug + serde::Serialize + serde::de::DeserializeOwned,
    {
        for (variant, wire) in E::VARIANTS {
            assert_eq!(variant.as_str(), *wire);
            assert_eq!(E::from_wire(variant.as_str()).unwrap(), *variant);

            let json = serde_json::to_value(variant).unwrap();
            assert_eq!(json, serde_json::Value::String(wire.to_string()));
            let back: E = serde_json::from_value(json).unwrap();
            assert_eq!(back, *variant);
        }
    }

    #[test]
    fn every_enum_round_trips() {
        assert_round_trips::<AccessPolicy>();
        assert_round_trips::<Resolution>();
        assert_round_trips::<LiveResolution>();
        assert_round_trips::<LanguageCode>();
        assert_round_trips::<DefaultPolicy>();
        assert_round_trips::<SortOrder>();
        assert_round_trips::<Mp4Support>();
        assert_round_trips::<MediaQuality>();
        assert_round_trips::<MediaPolicy>();
        assert_round_trips::<PlaylistMode>();
        assert_round_trips::<PlayOrder>();
        assert_round_trips::<ModerationType>();
    }

    #[test]
    fn wire_strings_are_unique() {
        let wires: Vec<&str> = Mp4Support::VARIANTS.iter().map(|(_, w)| *w).collect();
        let mut deduped = wires.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(wires.len(), deduped.len());
    }

    #[test]
    fn unknown_value_is_an_error() {
        let err = LanguageCode::from_wire("de").unwrap_err();
        match err {
            Error::UnknownEnumValue { enum_name, value } => {
                assert_eq!(enum_name, "LanguageCode");
                assert_eq!(value, "de");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn matching_is_exact() {
        assert!("EN".parse::<LanguageCode>().is_err());
        assert!(" en".parse::<LanguageCode>().is_err());
        assert_eq!("en".parse::<LanguageCode>().unwrap(), LanguageCode::En);
    }

    #[test]
    fn unknown_value_fails_json_decode() {
        let result: Result<AccessPolicy, _> = serde_json::from_str(r#""unlisted""#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unlisted"));
    }

    #[test]
    fn display_uses_wire_string() {
        assert_eq!(Resolution::R1080p.to_string(), "1080p");
        assert_eq!(PlayOrder::CreatedDateDesc.to_string(), "createdDate DESC");
        assert_eq!(AccessPolicy::default(), AccessPolicy::Public);
    }
}
