use serde::{Deserialize, Serialize};

/// Ответ списочного эндпоинта: `{ data|items: [...], total? }`
///
/// The client never relies on this shape strictly (see the tolerant unwrap in
/// the frontend list controller); it documents the contract servers should follow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedEnvelope<T> {
    #[serde(alias = "items")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Query parameters appended to every list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl PageParams {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_accepts_items_alias() {
        let env: PagedEnvelope<i32> =
            serde_json::from_value(json!({"items": [1, 2], "total": 10})).unwrap();
        assert_eq!(env.data, vec![1, 2]);
        assert_eq!(env.total, Some(10));

        let env: PagedEnvelope<i32> = serde_json::from_value(json!({"data": [3]})).unwrap();
        assert_eq!(env.total, None);
    }

    #[test]
    fn test_page_params_pairs() {
        let pairs = PageParams { page: 2, limit: 50 }.to_pairs();
        assert_eq!(pairs[0], ("page".to_string(), "2".to_string()));
        assert_eq!(pairs[1], ("limit".to_string(), "50".to_string()));
    }
}
