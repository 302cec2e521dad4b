mod common;

use axum::http::StatusCode;
use common::{Browser, app, flashes, json_body, location, test_db};
use serde_json::json;

#[tokio::test]
async fn anonymous_requests_are_sent_to_login() {
    let db = test_db().await;
    let mut browser = Browser::new(app(&db));

    for uri in ["/", "/clienti", "/ricambi", "/lavorazioni", "/storico"] {
        let resp = browser.get(uri).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "GET {uri}");
        assert_eq!(location(&resp), "/login", "GET {uri}");
    }
}

#[tokio::test]
async fn wrong_password_is_flashed_on_login_page() {
    let db = test_db().await;
    let mut browser = Browser::new(app(&db));

    let resp = browser
        .post_form("/login", "username=anna&password=nope")
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let page = browser.page("/login").await;
    assert_eq!(page["template"], "login.html");
    assert_eq!(flashes(&page), vec!["❌ Username o password errati"]);

    // flashes are shown once
    let page = browser.page("/login").await;
    assert!(flashes(&page).is_empty());
}

#[tokio::test]
async fn login_greets_with_real_name_and_logout_ends_session() {
    let db = test_db().await;
    let mut browser = Browser::new(app(&db));

    let resp = browser
        .post_form("/login", "username=anna&password=pw-anna")
        .await;
    assert_eq!(location(&resp), "/");

    let home = browser.page("/").await;
    assert_eq!(home["template"], "home.html");
    assert_eq!(home["data"]["nome_reale"], "Anna Bianchi");
    assert_eq!(flashes(&home), vec!["✅ Benvenuto, Anna Bianchi!"]);

    let resp = browser.get("/logout").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let resp = browser.get("/clienti").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn customers_are_private_to_their_owner() {
    let db = test_db().await;
    let router = app(&db);
    let mut anna = Browser::logged_in(router.clone(), "anna", "pw-anna").await;
    let mut bruno = Browser::logged_in(router, "bruno", "pw-bruno").await;

    let resp = anna
        .post_form("/salva_cliente", "nome=+Mario+&cognome=Rossi&telefono=333")
        .await;
    assert_eq!(location(&resp), "/clienti");

    let page = anna.page("/clienti").await;
    assert_eq!(flashes(&page), vec!["✅ Cliente salvato correttamente"]);
    let clienti = page["data"]["clienti"].as_array().unwrap();
    assert_eq!(clienti.len(), 1);
    assert_eq!(clienti[0]["nome"], "Mario");
    let id = clienti[0]["id"].as_i64().unwrap();

    let page = bruno.page("/clienti").await;
    assert!(page["data"]["clienti"].as_array().unwrap().is_empty());

    let resp = bruno.get(&format!("/modifica_cliente/{id}")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    bruno
        .post_form(&format!("/aggiorna_cliente/{id}"), "nome=Hack&cognome=Hack")
        .await;
    bruno.get(&format!("/elimina_cliente/{id}")).await;
    let page = bruno.page("/clienti").await;
    assert!(
        flashes(&page)
            .iter()
            .all(|m| m.contains("non trovato o non accessibile"))
    );

    let page = anna.page(&format!("/modifica_cliente/{id}")).await;
    assert_eq!(page["template"], "modifica_cliente.html");
    assert_eq!(page["data"]["cliente"]["nome"], "Mario");
    assert_eq!(page["data"]["cliente"]["telefono"], "333");
}

#[tokio::test]
async fn customer_with_vehicles_cannot_be_deleted() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_cliente", "nome=Lucia&cognome=Verdi")
        .await;
    let page = anna.page("/clienti").await;
    let customer_id = page["data"]["clienti"][0]["id"].as_i64().unwrap();

    anna.post_form(
        "/salva_vettura",
        &format!("cliente_id={customer_id}&targa=AB123CD&marca=Fiat&modello=Panda"),
    )
    .await;
    let page = anna.page("/vetture").await;
    assert_eq!(flashes(&page), vec!["✅ Vettura salvata correttamente"]);
    assert_eq!(page["data"]["vetture"][0]["cliente_nome"], "Lucia Verdi");

    anna.get(&format!("/elimina_cliente/{customer_id}")).await;
    let page = anna.page("/clienti").await;
    assert_eq!(
        flashes(&page),
        vec!["❌ Non puoi eliminare: il cliente ha 1 vettura/e associate."]
    );
    assert_eq!(page["data"]["clienti"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn vehicle_cannot_point_at_someone_elses_customer() {
    let db = test_db().await;
    let router = app(&db);
    let mut anna = Browser::logged_in(router.clone(), "anna", "pw-anna").await;
    let mut bruno = Browser::logged_in(router, "bruno", "pw-bruno").await;

    anna.post_form("/salva_cliente", "nome=Lucia&cognome=Verdi")
        .await;
    let page = anna.page("/clienti").await;
    let customer_id = page["data"]["clienti"][0]["id"].as_i64().unwrap();

    let resp = bruno
        .post_form(
            "/salva_vettura",
            &format!("cliente_id={customer_id}&targa=ZZ999ZZ"),
        )
        .await;
    assert_eq!(location(&resp), "/inserisci_vettura");
    let page = bruno.page("/vetture").await;
    assert!(page["data"]["vetture"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn taking_parts_reports_stock_thresholds() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_ricambio", "nome=Filtro+olio&codice=FO-1&quantita=3")
        .await;
    let page = anna.page("/ricambi").await;
    let id = page["data"]["ricambi"][0]["id"].as_i64().unwrap();

    let expected = [
        vec![
            "✅ Scalato 1 Filtro olio",
            "⚠️ Giacenza bassa per Filtro olio (2 rimasti)",
        ],
        vec!["✅ Scalato 1 Filtro olio", "⚠️ Solo 1 Filtro olio rimasto"],
        vec!["✅ Scalato 1 Filtro olio", "❌ Filtro olio esaurito!"],
        vec!["❌ Filtro olio esaurito!"],
    ];
    for messages in expected {
        let resp = anna.get(&format!("/scala_ricambio/{id}")).await;
        assert_eq!(location(&resp), "/ricambi");
        let page = anna.page("/ricambi").await;
        assert_eq!(flashes(&page), messages);
    }

    let page = anna.page("/ricambi").await;
    assert_eq!(page["data"]["ricambi"][0]["quantita"], 0);

    let home = anna.page("/").await;
    assert_eq!(home["data"]["ricambi_in_esaurimento"], 1);
}

#[tokio::test]
async fn duplicate_part_code_is_rejected() {
    let db = test_db().await;
    let router = app(&db);
    let mut anna = Browser::logged_in(router.clone(), "anna", "pw-anna").await;
    let mut bruno = Browser::logged_in(router, "bruno", "pw-bruno").await;

    anna.post_form("/salva_ricambio", "nome=Pastiglie&codice=PF-9&quantita=4")
        .await;
    anna.post_form("/salva_ricambio", "nome=Altro&codice=PF-9&quantita=1")
        .await;
    let page = anna.page("/ricambi").await;
    assert_eq!(
        flashes(&page),
        vec![
            "✅ Ricambio salvato correttamente",
            "❌ Codice ricambio già esistente"
        ]
    );
    assert_eq!(page["data"]["ricambi"].as_array().unwrap().len(), 1);

    // codes are unique per workshop
    bruno
        .post_form("/salva_ricambio", "nome=Pastiglie&codice=PF-9&quantita=2")
        .await;
    let page = bruno.page("/ricambi").await;
    assert_eq!(flashes(&page), vec!["✅ Ricambio salvato correttamente"]);
}

#[tokio::test]
async fn model_with_linked_parts_cannot_be_deleted() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_modello", "marca=Fiat&modello=Punto&cilindrata=1200")
        .await;
    anna.post_form("/salva_ricambio", "nome=Candela&codice=C-1&quantita=8")
        .await;
    let models = anna.page("/modelli").await;
    let model_id = models["data"]["modelli"][0]["id"].as_i64().unwrap();
    let parts = anna.page("/ricambi").await;
    let part_id = parts["data"]["ricambi"][0]["id"].as_i64().unwrap();

    anna.post_form(
        &format!("/modello/{model_id}/aggiungi_ricambio"),
        &format!("ricambio_id={part_id}"),
    )
    .await;
    let page = anna.page(&format!("/modello/{model_id}/ricambi")).await;
    assert_eq!(flashes(&page), vec!["✅ Ricambio associato al modello"]);
    assert_eq!(page["data"]["associati"].as_array().unwrap().len(), 1);
    assert!(page["data"]["non_associati"].as_array().unwrap().is_empty());

    anna.get(&format!("/elimina_modello/{model_id}")).await;
    let page = anna.page("/modelli").await;
    assert_eq!(
        flashes(&page),
        vec!["❌ Rimuovi prima le associazioni ricambi a questo modello."]
    );

    anna.get(&format!("/modello/{model_id}/rimuovi_ricambio/{part_id}"))
        .await;
    anna.get(&format!("/elimina_modello/{model_id}")).await;
    let page = anna.page("/modelli").await;
    assert_eq!(
        flashes(&page),
        vec![
            "✅ Associazione rimossa",
            "✅ Modello eliminato correttamente"
        ]
    );
    assert!(page["data"]["modelli"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn work_order_status_is_updated_over_json() {
    let db = test_db().await;
    let router = app(&db);
    let mut anna = Browser::logged_in(router.clone(), "anna", "pw-anna").await;
    let mut bruno = Browser::logged_in(router, "bruno", "pw-bruno").await;

    anna.post_form("/salva_lavorazione", "descrizione=Tagliando")
        .await;
    let page = anna.page("/lavorazioni").await;
    assert_eq!(flashes(&page), vec!["✅ Lavorazione salvata correttamente"]);
    let order = &page["data"]["lavorazioni"][0];
    assert_eq!(order["stato"], "ordine inviato");
    let id = order["id"].as_i64().unwrap();

    let resp = anna
        .post_json(
            &format!("/aggiorna_stato_lavorazione/{id}"),
            json!({ "stato": "  Completata " }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["stato"], "completata");

    let resp = anna
        .post_json(
            &format!("/aggiorna_stato_lavorazione/{id}"),
            json!({ "stato": "archiviata" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["success"], false);

    let resp = bruno
        .post_json(
            &format!("/aggiorna_stato_lavorazione/{id}"),
            json!({ "stato": "in lavorazione" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let page = anna.page("/lavorazioni?stato=completata").await;
    assert_eq!(page["data"]["lavorazioni"].as_array().unwrap().len(), 1);
    let page = anna.page("/lavorazioni?stato=in+lavorazione").await;
    assert!(page["data"]["lavorazioni"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn reminders_round_trip_through_json_api() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    let resp = anna
        .post_json(
            "/aggiungi_promemoria",
            json!({ "testo": "Ordinare olio", "descrizione": "5W30, 20 litri" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    let id = body["id"].as_i64().unwrap();

    let resp = anna
        .post_json("/aggiungi_promemoria", json!({ "testo": "   " }))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let list = json_body(anna.get("/lista_promemoria").await).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["titolo"], "Ordinare olio");
    assert_eq!(list[0]["info"], "5W30, 20 litri");

    let resp = anna
        .post_json(&format!("/elimina_promemoria/{id}"), json!({}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = anna
        .post_json(&format!("/elimina_promemoria/{id}"), json!({}))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let list = json_body(anna.get("/lista_promemoria").await).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn actions_show_up_in_history() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_cliente", "nome=Mario&cognome=Rossi")
        .await;

    let page = anna.page("/storico").await;
    assert_eq!(page["template"], "storico.html");
    let azioni = page["data"]["azioni"].as_array().unwrap();
    assert!(
        azioni
            .iter()
            .any(|a| a["azione"] == "cliente inserito"
                && a["dettagli"].as_str().unwrap().contains("Mario Rossi"))
    );
}

#[tokio::test]
async fn tire_stock_never_goes_negative() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form(
        "/salva_gomma",
        "marca=Michelin&misura=205%2F55+R16&stagione=estiva&quantita=1&posizione=A3",
    )
    .await;
    let page = anna.page("/gomme").await;
    let id = page["data"]["gomme"][0]["id"].as_i64().unwrap();

    anna.get(&format!("/scala_gomma/{id}")).await;
    let page = anna.page("/gomme").await;
    assert_eq!(
        flashes(&page),
        vec![
            "✅ Giacenza gomme aggiornata",
            "❌ Michelin 205/55 R16 esaurito!"
        ]
    );
    assert_eq!(page["data"]["gomme"][0]["quantita"], 0);

    // nothing left: refused, no success message
    anna.get(&format!("/scala_gomma/{id}")).await;
    let page = anna.page("/gomme").await;
    assert_eq!(flashes(&page), vec!["❌ Michelin 205/55 R16 esaurito!"]);
    assert_eq!(page["data"]["gomme"][0]["quantita"], 0);

    let history = anna.page("/storico").await;
    let taken = history["data"]["azioni"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["azione"] == "gomma scalata")
        .count();
    assert_eq!(taken, 1);
}

#[tokio::test]
async fn unlinking_a_part_that_was_never_linked_changes_nothing() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_modello", "marca=Fiat&modello=Doblo").await;
    anna.post_form("/salva_ricambio", "nome=Cinghia&codice=CD-2&quantita=1")
        .await;
    let models = anna.page("/modelli").await;
    let model_id = models["data"]["modelli"][0]["id"].as_i64().unwrap();
    let parts = anna.page("/ricambi").await;
    let part_id = parts["data"]["ricambi"][0]["id"].as_i64().unwrap();

    let resp = anna
        .get(&format!("/modello/{model_id}/rimuovi_ricambio/{part_id}"))
        .await;
    assert_eq!(location(&resp), format!("/modello/{model_id}/ricambi"));
    let page = anna.page(&format!("/modello/{model_id}/ricambi")).await;
    assert_eq!(
        flashes(&page),
        vec!["ℹ️ Ricambio non associato a questo modello"]
    );

    let history = anna.page("/storico").await;
    assert!(
        history["data"]["azioni"]
            .as_array()
            .unwrap()
            .iter()
            .all(|a| a["azione"] != "associazione rimossa")
    );
}

#[tokio::test]
async fn json_routes_answer_malformed_bodies_with_json() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_lavorazione", "descrizione=Freni").await;
    let page = anna.page("/lavorazioni").await;
    let id = page["data"]["lavorazioni"][0]["id"].as_i64().unwrap();

    // misspelled field
    let resp = anna
        .post_json(
            &format!("/aggiorna_stato_lavorazione/{id}"),
            json!({ "status": "completata" }),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("stato"));

    // form body where JSON is expected
    let resp = anna
        .post_form("/aggiungi_promemoria", "testo=Chiamare+cliente")
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let page = anna.page("/lavorazioni").await;
    assert_eq!(page["data"]["lavorazioni"][0]["stato"], "ordine inviato");
    let list = json_body(anna.get("/lista_promemoria").await).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn vehicle_with_work_orders_cannot_be_deleted() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_vettura", "targa=GH456JK&marca=Opel&modello=Corsa")
        .await;
    let page = anna.page("/vetture").await;
    let vehicle_id = page["data"]["vetture"][0]["id"].as_i64().unwrap();
    assert_eq!(page["data"]["vetture"][0]["cliente_nome"], "—");

    anna.post_form(
        "/salva_lavorazione",
        &format!("vettura_id={vehicle_id}&descrizione=Cambio+olio"),
    )
    .await;
    let page = anna.page("/lavorazioni").await;
    assert_eq!(page["data"]["lavorazioni"][0]["targa"], "GH456JK");

    anna.get(&format!("/elimina_vettura/{vehicle_id}")).await;
    let page = anna.page("/vetture").await;
    assert_eq!(
        flashes(&page),
        vec!["❌ Non puoi eliminare: la vettura ha 1 lavorazione/i associate."]
    );
    assert_eq!(page["data"]["vetture"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn part_linked_to_a_model_cannot_be_deleted() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_modello", "marca=Ford&modello=Fiesta").await;
    anna.post_form("/salva_ricambio", "nome=Filtro+aria&codice=FA-3&quantita=5")
        .await;
    let models = anna.page("/modelli").await;
    let model_id = models["data"]["modelli"][0]["id"].as_i64().unwrap();
    let parts = anna.page("/ricambi").await;
    let part_id = parts["data"]["ricambi"][0]["id"].as_i64().unwrap();
    anna.post_form(
        &format!("/modello/{model_id}/aggiungi_ricambio"),
        &format!("ricambio_id={part_id}"),
    )
    .await;
    anna.page(&format!("/modello/{model_id}/ricambi")).await;

    anna.get(&format!("/elimina_ricambio/{part_id}")).await;
    let page = anna.page("/ricambi").await;
    assert_eq!(
        flashes(&page),
        vec!["❌ Rimuovi prima le associazioni di questo ricambio ai modelli."]
    );
    assert_eq!(page["data"]["ricambi"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn using_a_part_on_a_work_order_takes_it_from_stock() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_ricambio", "nome=Pastiglie&codice=PA-1&quantita=3")
        .await;
    anna.post_form("/salva_lavorazione", "descrizione=Freni+anteriori")
        .await;
    let parts = anna.page("/ricambi").await;
    let part_id = parts["data"]["ricambi"][0]["id"].as_i64().unwrap();
    let orders = anna.page("/lavorazioni").await;
    let order_id = orders["data"]["lavorazioni"][0]["id"].as_i64().unwrap();

    let resp = anna
        .post_form(
            &format!("/lavorazione/{order_id}/usa_ricambio"),
            &format!("ricambio_id={part_id}"),
        )
        .await;
    assert_eq!(location(&resp), format!("/modifica_lavorazione/{order_id}"));

    let page = anna.page(&format!("/modifica_lavorazione/{order_id}")).await;
    assert_eq!(
        flashes(&page),
        vec![
            "✅ Scalato 1 Pastiglie",
            "⚠️ Giacenza bassa per Pastiglie (2 rimasti)"
        ]
    );

    let parts = anna.page("/ricambi").await;
    assert_eq!(parts["data"]["ricambi"][0]["quantita"], 2);

    let history = anna.page("/storico").await;
    assert!(history["data"]["azioni"].as_array().unwrap().iter().any(|a| {
        a["azione"] == "ricambio scalato"
            && a["dettagli"]
                .as_str()
                .unwrap()
                .contains(&format!("lavorazione #{order_id}"))
    }));
}

#[tokio::test]
async fn updating_a_part_to_a_taken_code_is_rejected() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_ricambio", "nome=Candela&codice=C-1&quantita=4")
        .await;
    anna.post_form("/salva_ricambio", "nome=Bobina&codice=B-1&quantita=2")
        .await;
    let page = anna.page("/ricambi").await;
    // newest first
    assert_eq!(page["data"]["ricambi"][0]["codice"], "B-1");
    let id = page["data"]["ricambi"][0]["id"].as_i64().unwrap();

    anna.post_form(
        &format!("/aggiorna_ricambio/{id}"),
        "nome=Bobina&codice=C-1&quantita=2",
    )
    .await;
    let page = anna.page("/ricambi").await;
    assert_eq!(flashes(&page), vec!["❌ Codice ricambio già in uso"]);
    assert_eq!(page["data"]["ricambi"][0]["codice"], "B-1");
}

#[tokio::test]
async fn model_update_requires_make_and_name() {
    let db = test_db().await;
    let mut anna = Browser::logged_in(app(&db), "anna", "pw-anna").await;

    anna.post_form("/salva_modello", "marca=Lancia&modello=Ypsilon")
        .await;
    let page = anna.page("/modelli").await;
    let id = page["data"]["modelli"][0]["id"].as_i64().unwrap();

    let resp = anna
        .post_form(&format!("/aggiorna_modello/{id}"), "marca=+&modello=Ypsilon")
        .await;
    assert_eq!(location(&resp), format!("/modifica_modello/{id}"));

    let page = anna.page(&format!("/modifica_modello/{id}")).await;
    assert_eq!(flashes(&page), vec!["❌ Marca e modello sono obbligatori"]);
    assert_eq!(page["data"]["modello"]["marca"], "Lancia");
}

#[tokio::test]
async fn bootstrap_users_are_created_once_and_can_log_in() {
    let db = test_db().await;

    assert!(
        db.storage
            .ensure_user("carla", "pw-carla", Some("Carla Neri"))
            .await
            .unwrap()
    );
    // a second start leaves the existing account alone
    assert!(
        !db.storage
            .ensure_user("carla", "other", None)
            .await
            .unwrap()
    );

    let mut carla = Browser::new(app(&db));
    carla
        .post_form("/login", "username=carla&password=pw-carla")
        .await;
    let home = carla.page("/").await;
    assert_eq!(home["data"]["nome_reale"], "Carla Neri");

    let mut intruder = Browser::new(app(&db));
    let resp = intruder
        .post_form("/login", "username=carla&password=other")
        .await;
    assert_eq!(location(&resp), "/login");
}
