use bl_core::{ArticleDetail, ArticleSummary, NarrativeCluster, Result};
use schemars::gen::SchemaSettings;
use serde_json::{json, Value};

pub const API_TITLE: &str = "🧠 Bias Lab API";
pub const API_VERSION: &str = "0.2.0";
pub const API_DESCRIPTION: &str = "AI-powered media bias detection and analysis API. Identify ideological stance, factual grounding, framing choices, emotional tone, and source transparency in news articles.";

/// Builds the OpenAPI 3 document served at `/openapi.json`.
pub fn openapi_document() -> Result<Value> {
    let mut gen = SchemaSettings::openapi3().into_generator();
    let summary = serde_json::to_value(gen.subschema_for::<ArticleSummary>())?;
    let detail = serde_json::to_value(gen.subschema_for::<ArticleDetail>())?;
    let narrative = serde_json::to_value(gen.subschema_for::<NarrativeCluster>())?;

    let mut schemas = serde_json::to_value(gen.definitions())?;
    schemas["HTTPError"] = json!({
        "type": "object",
        "required": ["detail"],
        "properties": { "detail": { "type": "string" } }
    });

    let ok = |schema: Value| {
        json!({
            "200": {
                "description": "Successful Response",
                "content": { "application/json": { "schema": schema } }
            }
        })
    };

    let mut article_responses = ok(detail);
    article_responses["404"] = json!({
        "description": "Article not found",
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/HTTPError" } }
        }
    });

    Ok(json!({
        "openapi": "3.0.3",
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": API_DESCRIPTION,
        },
        "paths": {
            "/health": {
                "get": {
                    "summary": "Health",
                    "operationId": "health",
                    "responses": ok(json!({
                        "type": "object",
                        "additionalProperties": { "type": "string" }
                    })),
                }
            },
            "/articles": {
                "get": {
                    "summary": "List Articles",
                    "operationId": "list_articles",
                    "responses": ok(json!({ "type": "array", "items": summary })),
                }
            },
            "/articles/{article_id}": {
                "get": {
                    "summary": "Get Article",
                    "operationId": "get_article",
                    "parameters": [{
                        "name": "article_id",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string" }
                    }],
                    "responses": article_responses,
                }
            },
            "/narratives": {
                "get": {
                    "summary": "List Narratives",
                    "operationId": "list_narratives",
                    "responses": ok(json!({ "type": "array", "items": narrative })),
                }
            }
        },
        "components": { "schemas": schemas }
    }))
}

pub fn swagger_ui_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <link type="text/css" rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@4.15.5/swagger-ui-bundle.css" />
    <link type="text/css" rel="stylesheet" href="/static/custom.css" />
    <title>{title}</title>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@4.15.5/swagger-ui-bundle.js"></script>
    <script>
    const ui = SwaggerUIBundle({{
        url: '/openapi.json',
        dom_id: '#swagger-ui',
        presets: [
            SwaggerUIBundle.presets.apis,
            SwaggerUIBundle.presets.standalone
        ],
        layout: "StandaloneLayout",
        deepLinking: true,
        showExtensions: true,
        showCommonExtensions: true
    }})
    </script>
</body>
</html>
"#,
        title = API_TITLE
    )
}

pub fn redoc_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title} - ReDoc</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link type="text/css" rel="stylesheet" href="/static/custom.css" />
</head>
<body>
    <redoc spec-url="/openapi.json"></redoc>
    <script src="https://cdn.jsdelivr.net/npm/redoc@next/bundles/redoc.standalone.js"></script>
</body>
</html>
"#,
        title = API_TITLE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = openapi_document().unwrap();
        for path in ["/health", "/articles", "/articles/{article_id}", "/narratives"] {
            assert!(doc["paths"][path]["get"].is_object(), "missing {}", path);
        }
        assert_eq!(doc["info"]["version"], API_VERSION);
    }

    #[test]
    fn test_openapi_schemas_are_registered() {
        let doc = openapi_document().unwrap();
        let schemas = &doc["components"]["schemas"];
        for name in ["ArticleSummary", "ArticleDetail", "NarrativeCluster", "BiasScores", "HTTPError"] {
            assert!(schemas[name].is_object(), "missing schema {}", name);
        }
        assert_eq!(
            doc["paths"]["/articles/{article_id}"]["get"]["responses"]["200"]["content"]
                ["application/json"]["schema"]["$ref"],
            "#/components/schemas/ArticleDetail"
        );
    }

    #[test]
    fn test_docs_pages_point_at_openapi() {
        assert!(swagger_ui_html().contains("url: '/openapi.json'"));
        assert!(swagger_ui_html().contains("/static/custom.css"));
        assert!(redoc_html().contains("spec-url=\"/openapi.json\""));
    }
}
