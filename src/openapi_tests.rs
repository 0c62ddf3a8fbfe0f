#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.expect("components are generated");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            other => panic!("{} should be an object schema, got {:?}", name, other.is_some()),
        }
    }

    #[test]
    fn test_openapi_document_serializes() {
        let openapi = ApiDoc::openapi();
        let json = serde_json::to_string(&openapi).unwrap();
        assert!(json.contains("ErrorResponse"));
        assert!(!json.contains("crate::schemas::ErrorResponse"));

        let components = openapi.components.as_ref().unwrap();
        assert!(components.security_schemes.contains_key("bearer"));
    }

    #[test]
    fn test_every_agent_route_is_documented() {
        let openapi = ApiDoc::openapi();
        let expected = [
            ("/health", PathItemType::Get),
            ("/api/v1/agents/{agent_id}/retailers", PathItemType::Get),
            ("/api/v1/agents/{agent_id}/retailers/{retailer_id}", PathItemType::Get),
            ("/api/v1/agents/{agent_id}/retailers/{retailer_id}/sales-summary", PathItemType::Get),
            ("/api/v1/agents/{agent_id}/retailers/{retailer_id}/block", PathItemType::Post),
            ("/api/v1/agents/{agent_id}/summary", PathItemType::Get),
            ("/api/v1/agents/{agent_id}/commission-statement", PathItemType::Get),
            ("/api/v1/agents/{agent_id}/transactions", PathItemType::Get),
            ("/api/v1/agents/{agent_id}/bank-account", PathItemType::Get),
            ("/api/v1/agents/{agent_id}/bank-account", PathItemType::Put),
            ("/api/v1/agents/{agent_id}/dashboard", PathItemType::Get),
        ];

        for (path, method) in expected {
            let item = openapi
                .paths
                .paths
                .get(path)
                .unwrap_or_else(|| panic!("{} is not documented", path));
            assert!(
                item.operations.contains_key(&method),
                "{} is missing one of its operations",
                path
            );
        }
    }

    #[test]
    fn test_summary_schema_has_no_pending_field() {
        let properties = object_properties("AgentSummary");
        assert!(properties.contains(&"total_commission".to_string()));
        assert!(properties.contains(&"paid_commission".to_string()));
        assert!(!properties.contains(&"pending_commission".to_string()));
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.contains(&field.to_string()));
        }
    }
}
