use std::fmt;
use std::str::FromStr;

use http::Method;
use serde::Serialize;

use crate::client::Bricklink;
use crate::error::{RequestError, Result};

/// Catalog item classes accepted by the item endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Minifig,
    Part,
    Set,
    Book,
    Gear,
    Catalog,
    Instruction,
    UnsortedLot,
    OriginalBox,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Minifig => "MINIFIG",
            ItemType::Part => "PART",
            ItemType::Set => "SET",
            ItemType::Book => "BOOK",
            ItemType::Gear => "GEAR",
            ItemType::Catalog => "CATALOG",
            ItemType::Instruction => "INSTRUCTION",
            ItemType::UnsortedLot => "UNSORTED_LOT",
            ItemType::OriginalBox => "ORIGINAL_BOX",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = RequestError;

    /// Case-insensitive; accepts the wire spelling (`"UNSORTED_LOT"`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MINIFIG" => Ok(ItemType::Minifig),
            "PART" => Ok(ItemType::Part),
            "SET" => Ok(ItemType::Set),
            "BOOK" => Ok(ItemType::Book),
            "GEAR" => Ok(ItemType::Gear),
            "CATALOG" => Ok(ItemType::Catalog),
            "INSTRUCTION" => Ok(ItemType::Instruction),
            "UNSORTED_LOT" => Ok(ItemType::UnsortedLot),
            "ORIGINAL_BOX" => Ok(ItemType::OriginalBox),
            _ => Err(RequestError::UnknownItemType(s.to_owned())),
        }
    }
}

/// Optional filters for the price guide endpoint.
///
/// Unset fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceGuideQuery<'a> {
    /// `"sold"` for closed sales, `"stock"` for current inventory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_type: Option<&'a str>,
    /// `"N"` for new, `"U"` for used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_or_used: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<&'a str>,
}

/// Catalog endpoints. Thin path builders over [`Bricklink::execute`]; the
/// response body is returned verbatim.
impl Bricklink {
    /// Fetch a catalog item.
    pub async fn item(&self, item_type: ItemType, item_number: &str) -> Result<String> {
        let path = item_path(item_type, item_number)?;
        self.execute(Method::GET, &path).await
    }

    /// Fetch the price guide of a catalog item.
    pub async fn item_price(
        &self,
        item_type: ItemType,
        item_number: &str,
        query: &PriceGuideQuery<'_>,
    ) -> Result<String> {
        let mut path = item_path(item_type, item_number)?;
        path.push_str("/price");

        let query = serde_urlencoded::to_string(query).map_err(RequestError::from)?;
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }

        self.execute(Method::GET, &path).await
    }

    /// Fetch the image of a catalog item in the given color.
    pub async fn item_image(
        &self,
        item_type: ItemType,
        item_number: &str,
        color_id: u32,
    ) -> Result<String> {
        let mut path = item_path(item_type, item_number)?;
        path.push_str(&format!("/images/{}", color_id));
        self.execute(Method::GET, &path).await
    }

    /// Fetch a single color definition.
    pub async fn color(&self, color_id: u32) -> Result<String> {
        self.execute(Method::GET, &format!("/colors/{}", color_id))
            .await
    }

    /// Fetch the full color list.
    pub async fn color_list(&self) -> Result<String> {
        self.execute(Method::GET, "/colors").await
    }

    /// Fetch a single category definition.
    pub async fn category(&self, category_id: u32) -> Result<String> {
        self.execute(Method::GET, &format!("/categories/{}", category_id))
            .await
    }

    /// Fetch the full category list.
    pub async fn category_list(&self) -> Result<String> {
        self.execute(Method::GET, "/categories").await
    }
}

fn item_path(item_type: ItemType, item_number: &str) -> std::result::Result<String, RequestError> {
    if item_number.is_empty() {
        return Err(RequestError::MissingItemNumber);
    }
    Ok(format!("/items/{}/{}", item_type, item_number))
}
