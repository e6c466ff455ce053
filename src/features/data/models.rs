use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 产品特性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
    /// 价值亮点
    pub value: String,
}

/// 技术优势
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechAdvantage {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// 应用场景
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCase {
    pub icon: String,
    pub scenario: String,
    pub pain_point: String,
    pub solution: String,
    pub benefit: String,
}

/// 服务交付项（服务模式表格的一行）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryItem {
    pub report_type: String,
    pub frequency: String,
    pub core_content: String,
    pub value: String,
}

/// 服务模式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceModel {
    pub delivery_items: Vec<DeliveryItem>,
}

impl ServiceModel {
    /// 从原始载荷中解析；缺少 `deliveryItems` 或任一行字段不全时返回 `None`
    pub fn from_payload(payload: &Value) -> Option<Self> {
        serde_json::from_value(payload.clone()).ok()
    }
}

/// 从列表类载荷中取出记录。
///
/// 支持两种形态：顶层数组，或对象中 `list_key` 字段下的数组。
/// 任一记录缺字段即视为整体格式不符，返回 `None`。
pub fn records_from<T: DeserializeOwned>(payload: &Value, list_key: &str) -> Option<Vec<T>> {
    let list = match payload {
        Value::Array(_) => payload,
        Value::Object(map) => map.get(list_key).filter(|v| v.is_array())?,
        _ => return None,
    };
    serde_json::from_value(list.clone()).ok()
}
