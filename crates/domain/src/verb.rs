//! Browse API verbs
//!
//! Every supported call is a [`Verb`]. The verb alone decides the HTTP method
//! and the path template; request parameters never change either.

use serde::{Deserialize, Serialize};

use crate::constants::ITEM_ID_PARAM;
use crate::impl_named_enum_conversions;

/// A named Browse API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verb {
    /// Keyword/category search over item summaries.
    Search,
    /// Search item summaries by a base64 image.
    SearchByImage,
    /// Fetch one item by its RESTful id.
    GetItem,
    /// Fetch one item by its legacy (Trading API) id.
    GetItemByLegacyId,
    /// Fetch several items by id.
    GetItems,
    /// Fetch all items of an item group.
    GetItemsByItemGroup,
    /// Check a product's compatibility with an item.
    CheckCompatibility,
}

impl_named_enum_conversions!(Verb {
    Search => "search",
    SearchByImage => "searchByImage",
    GetItem => "getItem",
    GetItemByLegacyId => "getItemByLegacyId",
    GetItems => "getItems",
    GetItemsByItemGroup => "getItemsByItemGroup",
    CheckCompatibility => "checkCompatibility",
});

/// HTTP method used by a verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Parameters travel in the query string.
    Get,
    /// Parameters travel as a JSON body.
    Post,
}

impl_named_enum_conversions!(HttpMethod {
    Get => "GET",
    Post => "POST",
});

impl HttpMethod {
    /// Method for the given verb: POST for the two body-carrying calls, GET
    /// for everything else.
    pub fn for_verb(verb: Verb) -> Self {
        match verb {
            Verb::SearchByImage | Verb::CheckCompatibility => Self::Post,
            _ => Self::Get,
        }
    }
}

impl Verb {
    /// All supported verbs, in documentation order.
    pub const ALL: [Verb; 7] = [
        Verb::Search,
        Verb::SearchByImage,
        Verb::GetItem,
        Verb::GetItemByLegacyId,
        Verb::GetItems,
        Verb::GetItemsByItemGroup,
        Verb::CheckCompatibility,
    ];

    /// HTTP method for this verb.
    pub fn method(self) -> HttpMethod {
        HttpMethod::for_verb(self)
    }

    /// Path suffix appended to the API base URL.
    ///
    /// `{item_id}` marks the segment filled from request parameters.
    pub fn path_template(self) -> &'static str {
        match self {
            Self::Search => "/item_summary/search",
            Self::SearchByImage => "/item_summary/search_by_image",
            Self::GetItem => "/item/{item_id}",
            Self::GetItemByLegacyId => "/item/get_item_by_legacy_id",
            Self::GetItems => "/item/",
            Self::GetItemsByItemGroup => "/item/get_items_by_item_group",
            Self::CheckCompatibility => "/item/{item_id}/check_compatibility",
        }
    }

    /// Name of the request parameter substituted into the path, if any.
    pub fn path_param(self) -> Option<&'static str> {
        match self {
            Self::GetItem | Self::CheckCompatibility => Some(ITEM_ID_PARAM),
            _ => None,
        }
    }

    /// Whether the request parameters travel as a JSON body.
    pub fn has_body(self) -> bool {
        self.method() == HttpMethod::Post
    }
}
