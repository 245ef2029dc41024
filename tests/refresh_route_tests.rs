mod common;

use axum::{
    Router,
    extract::Path,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tokio::net::TcpListener;
use url::Url;

const PRODUCTION: &str = "id;produto;1970;1971\n\
    1;VINHO DE MESA;100;200\n\
    2;Tinto;60;120\n\
    3;Branco;40;80\n";

const PROCESSING: &str = "id\tcontrol\tcultivar\t1970\t1971\n\
    1\tTINTAS\tTINTAS\t10\t20\n\
    2\tti_Alicante\tAlicante Bouschet\tnd\t5\n";

const COMMERCE: &str = "1;VINHO DE MESA;VINHO DE MESA;10;20\n\
    2;vm_Tinto;Tinto;5;6\n";

const EXPORTS: &str = "Id;País;1970;1970;1971;1971\n\
    1;Alemanha;52;30;0;0\n";

/// Import files are served as Windows-1252, the way the portal publishes them.
const IMPORTS_LATIN1: &[u8] = b"Id;Pa\xEDs;1970;1970;1971;1971\n1;Chile;1;2;3;4\n";

/// Same layout as `PRODUCTION`, with a cell that is neither a number nor blank.
const PRODUCTION_BAD_NUMBER: &str = "id;produto;1970;1971\n\
    1;VINHO DE MESA;100;200\n\
    2;Tinto;n/a;120\n";

fn fixture(file: &str, production: &'static str) -> Option<Vec<u8>> {
    let body = if file == "Producao.csv" {
        production.as_bytes()
    } else if file.starts_with("Processa") {
        PROCESSING.as_bytes()
    } else if file == "Comercio.csv" {
        COMMERCE.as_bytes()
    } else if file.starts_with("Imp") {
        IMPORTS_LATIN1
    } else if file.starts_with("Exp") {
        EXPORTS.as_bytes()
    } else {
        return None;
    };
    Some(body.to_vec())
}

/// Serve the fixtures under `/download/`, answering 404 for `missing`.
async fn spawn_portal(missing: Option<&'static str>) -> Url {
    spawn_portal_with(missing, PRODUCTION).await
}

async fn spawn_portal_with(missing: Option<&'static str>, production: &'static str) -> Url {
    let app = Router::new().route(
        "/download/{file}",
        get(move |Path(file): Path<String>| async move {
            if Some(file.as_str()) == missing {
                return StatusCode::NOT_FOUND.into_response();
            }
            match fixture(&file, production) {
                Some(body) => {
                    ([(header::CONTENT_TYPE, "text/csv")], body).into_response()
                }
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind fixture server");
    let addr = listener.local_addr().expect("fixture server address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}/download/")).expect("fixture url")
}

#[tokio::test]
async fn refresh_reloads_every_table() {
    let base = spawn_portal(None).await;
    let app = common::spawn_app_with("refresh-ok", common::config_with_source(base)).await;
    let token = app.login("hugo", "pw").await;
    let token = Some(token.as_str());

    let expected = json!({"tables": [
        {"table": "producao", "rows": 4},
        {"table": "processamento", "rows": 8},
        {"table": "comercializacao", "rows": 2},
        {"table": "importacao", "rows": 10},
        {"table": "exportacao", "rows": 8}
    ]});

    let (status, body) = app.json("GET", "/inicializacao", token, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, expected);

    // a second run truncates and restarts ids
    let (status, body) = app.json("GET", "/inicializacao", token, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, expected);

    let (_, body) = app.json("GET", "/producao", token, None).await;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[0],
        json!({
            "id": 1,
            "categoria": "VINHO DE MESA",
            "nome": "Tinto",
            "ano": "1970",
            "valor_producao": 60.0
        })
    );

    let (_, body) = app.json("GET", "/importacao/1", token, None).await;
    assert_eq!(
        body,
        json!({
            "id": 1,
            "categoria": "Vinho_Mesa",
            "nome": "Chile",
            "ano": "1970",
            "quantidade": 1,
            "valor": 2.0
        })
    );

    let (_, body) = app
        .json(
            "POST",
            "/processamento/filtragem",
            token,
            Some(json!({"categoria": "Mesa", "ano": "1970"})),
        )
        .await;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["sub_categoria"], "TINTAS");
    assert_eq!(rows[0]["nome"], "Alicante Bouschet");
    assert_eq!(rows[0]["valor_processamento"], 0.0);

    let (_, body) = app.json("GET", "/comercializacao/2", token, None).await;
    assert_eq!(body["ano"], "1971");
    assert_eq!(body["litros_comercializacao"], 6.0);
}

#[tokio::test]
async fn failed_download_leaves_tables_untouched() {
    let base = spawn_portal(Some("ExpSuco.csv")).await;
    let app = common::spawn_app_with("refresh-fail", common::config_with_source(base)).await;
    let token = app.login("iris", "pw").await;
    let token = Some(token.as_str());

    let (status, _) = app
        .json(
            "POST",
            "/producao",
            token,
            Some(json!({"categoria": "SUCO", "nome": "Manual", "ano": "2000", "valor_producao": 1.0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.json("GET", "/inicializacao", token, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().expect("detail");
    assert!(detail.starts_with("Failed to refresh datasets"), "{detail}");
    assert!(detail.contains("ExpSuco.csv"), "{detail}");

    let (_, body) = app.json("GET", "/producao", token, None).await;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["nome"], "Manual");

    let (_, body) = app.json("GET", "/importacao", token, None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn refresh_requires_a_token() {
    let app = common::spawn_app("refresh-unauthorized").await;
    let (status, _) = app.json("GET", "/inicializacao", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Seed one production row and one export row that a failed refresh must keep.
async fn seed_manual_rows(app: &common::TestApp, token: Option<&str>) {
    let (status, _) = app
        .json(
            "POST",
            "/producao",
            token,
            Some(json!({"categoria": "SUCO", "nome": "Manual", "ano": "2000", "valor_producao": 1.0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = app
        .json(
            "POST",
            "/importacao",
            token,
            Some(json!({"categoria": "Suco_uva", "nome": "Manual", "ano": "2000", "quantidade": 1, "valor": 1.0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn assert_manual_rows_kept(app: &common::TestApp, token: Option<&str>) {
    for uri in ["/producao", "/importacao"] {
        let (_, body) = app.json("GET", uri, token, None).await;
        let rows = body.as_array().expect("array");
        assert_eq!(rows.len(), 1, "{uri}");
        assert_eq!(rows[0]["nome"], "Manual", "{uri}");
        assert_eq!(rows[0]["id"], 1, "{uri}");
    }
    let (_, body) = app.json("GET", "/processamento", token, None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn database_failure_mid_load_rolls_back_every_table() {
    let base = spawn_portal(None).await;
    let app = common::spawn_app_with("refresh-db-fail", common::config_with_source(base)).await;
    let token = app.login("lia", "pw").await;
    let token = Some(token.as_str());
    seed_manual_rows(&app, token).await;

    // exports is loaded last, after the other four tables were already replaced
    sqlx::query("DROP TABLE exports")
        .execute(app.storage.pool())
        .await
        .expect("drop exports");

    let (status, body) = app.json("GET", "/inicializacao", token, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Internal server error");

    assert_manual_rows_kept(&app, token).await;
}

#[tokio::test]
async fn bad_number_fails_refresh_and_keeps_rows() {
    let base = spawn_portal_with(None, PRODUCTION_BAD_NUMBER).await;
    let app = common::spawn_app_with("refresh-bad-number", common::config_with_source(base)).await;
    let token = app.login("miro", "pw").await;
    let token = Some(token.as_str());
    seed_manual_rows(&app, token).await;

    let (status, body) = app.json("GET", "/inicializacao", token, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().expect("detail");
    assert!(
        detail.starts_with("Failed to refresh datasets: Invalid number `n/a`"),
        "{detail}"
    );

    assert_manual_rows_kept(&app, token).await;
}
