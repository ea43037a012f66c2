use mentorize_server::{build_router, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn_app() -> String {
    let conn = mentorize_core::open_db_in_memory().unwrap();
    let app = build_router(AppState::new(conn));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post_json(client: &Client, url: String, body: Value) -> (StatusCode, Value) {
    let response = client.post(url).json(&body).send().await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let base = spawn_app().await;
    let body = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn note_lifecycle_uses_documented_status_codes() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, created) = post_json(
        &client,
        format!("{base}/anotacoes"),
        json!({ "titulo": "Aula 1", "conteudo": "vetores" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["titulo"], "Aula 1");
    assert_eq!(created["dataCriacao"].as_str().unwrap().len(), 19);

    let updated: Value = client
        .put(format!("{base}/anotacoes/{id}"))
        .json(&json!({ "titulo": "Aula 1 (revisada)" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated["titulo"], "Aula 1 (revisada)");
    assert_eq!(updated["conteudo"], "vetores");

    let hits: Value = client
        .get(format!("{base}/anotacoes/buscar?titulo=revisada"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let count: i64 = client
        .get(format!("{base}/anotacoes/contagem"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count, 1);

    let deleted = client
        .delete(format!("{base}/anotacoes/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = client
        .get(format!("{base}/anotacoes/id/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], format!("note not found with id: {id}"));
}

#[tokio::test]
async fn validation_failures_return_bad_request() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, body) = post_json(&client, format!("{base}/anotacoes"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");

    let (status, _) = post_json(
        &client,
        format!("{base}/metas"),
        json!({ "nome": "Demais", "progresso": 150 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &client,
        format!("{base}/tarefas"),
        json!({ "titulo": "x", "prioridade": "URGENTE" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let by_priority = client
        .get(format!("{base}/tarefas/prioridade/urgente"))
        .send()
        .await
        .unwrap();
    assert_eq!(by_priority.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_rejected_before_business_logic() {
    let base = spawn_app().await;
    let response = reqwest::get(format!("{base}/tarefas/id/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_missing_records_is_not_found_for_every_resource() {
    let base = spawn_app().await;
    let client = Client::new();

    for resource in ["anotacoes", "estudos", "metas", "tarefas"] {
        let response = client
            .delete(format!("{base}/{resource}/999"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{resource}");
    }
}

#[tokio::test]
async fn goal_progress_clamps_and_completes() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, goal) = post_json(
        &client,
        format!("{base}/metas"),
        json!({ "nome": "Ler 10 livros", "tipo": "pessoal" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["progresso"], 0);
    assert_eq!(goal["concluida"], false);
    assert_eq!(goal["diasRestantes"], Value::Null);
    assert_eq!(goal["atrasada"], false);
    let id = goal["id"].as_i64().unwrap();

    let clamped: Value = client
        .patch(format!("{base}/metas/{id}/progresso?progresso=150"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(clamped["progresso"], 100);
    assert_eq!(clamped["concluida"], true);

    let stats: Value = client
        .get(format!("{base}/metas/estatisticas"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["concluidas"], 1);
    assert_eq!(stats["progressoMedioAtivas"], Value::Null);
}

#[tokio::test]
async fn goal_past_deadline_is_reported_overdue() {
    let base = spawn_app().await;
    let client = Client::new();

    let (_, goal) = post_json(
        &client,
        format!("{base}/metas"),
        json!({ "nome": "Atrasada", "dataLimite": "2020-01-01T10:00" }),
    )
    .await;
    assert_eq!(goal["dataLimite"], "2020-01-01 10:00:00");
    assert_eq!(goal["atrasada"], true);
    assert_eq!(goal["diasRestantes"], 0);

    let overdue: Value = client
        .get(format!("{base}/metas/atrasadas"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(overdue.as_array().unwrap().len(), 1);
    assert_eq!(overdue[0]["id"], goal["id"]);
}

#[tokio::test]
async fn task_completion_toggles_conclusion_timestamp() {
    let base = spawn_app().await;
    let client = Client::new();

    let (status, task) = post_json(
        &client,
        format!("{base}/tarefas"),
        json!({ "titulo": "Lista 3", "prioridade": "média", "categoria": "study" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["prioridade"], "MÉDIA");
    assert_eq!(task["categoria"], "STUDY");
    assert_eq!(task["dataConclusao"], Value::Null);
    let id = task["id"].as_i64().unwrap();

    let done: Value = client
        .patch(format!("{base}/tarefas/{id}/concluir"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(done["concluida"], true);
    assert!(done["dataConclusao"].is_string());

    let reopened: Value = client
        .patch(format!("{base}/tarefas/{id}/reabrir"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(reopened["concluida"], false);
    assert_eq!(reopened["dataConclusao"], Value::Null);

    let stats: Value = client
        .get(format!("{base}/tarefas/estatisticas"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats, json!({ "concluidas": 0, "pendentes": 1 }));
}

#[tokio::test]
async fn study_statistics_follow_completed_sessions() {
    let base = spawn_app().await;
    let client = Client::new();

    let mut ids = Vec::new();
    for (title, subject, minutes) in [("a", "Física", 40), ("b", "Física", 20), ("c", "Química", 90)] {
        let (status, session) = post_json(
            &client,
            format!("{base}/estudos"),
            json!({ "titulo": title, "materia": subject, "duracao": minutes, "prazo": "2025-07-01" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(session["concluido"], false);
        assert_eq!(session["prazo"], "2025-07-01");
        ids.push(session["id"].as_i64().unwrap());
    }
    for id in &ids[..2] {
        let response = client
            .patch(format!("{base}/estudos/{id}/concluir"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let total: i64 = client
        .get(format!("{base}/estudos/estatisticas/tempo-total"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(total, 60);

    let average: Option<f64> = client
        .get(format!("{base}/estudos/estatisticas/duracao-media"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(average, Some(30.0));

    let by_subject: Value = client
        .get(format!("{base}/estudos/estatisticas/por-materia"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        by_subject,
        json!([
            { "materia": "Física", "quantidade": 2 },
            { "materia": "Química", "quantidade": 1 }
        ])
    );

    let pending: Value = client
        .get(format!("{base}/estudos/pendentes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(pending.as_array().unwrap().len(), 1);
}
