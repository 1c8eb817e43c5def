//! Integration tests for the calendar API and page

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::Value;
    use serial_test::serial;
    use tower::util::ServiceExt;

    use crate::test_utils::{
        add_event, add_topic, add_venue, body_to_string, install, test_context,
    };

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// Tests the feed is empty before the calendar is installed
    #[tokio::test]
    #[serial]
    async fn it_returns_empty_feed_before_install() {
        let ctx = test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(get("/api/calendar/feed?format=json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_string(response.into_body()).await, "[]");

        let response = ctx.app.oneshot(get("/api/calendar/feed")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_string(response.into_body()).await, "");
    }

    /// Tests the html feed only includes upcoming events in start order
    #[tokio::test]
    #[serial]
    async fn it_renders_upcoming_events_in_order() {
        let ctx = test_context().await;
        let types = install(&ctx.store).await;
        let venue = add_venue(&ctx.store, &types, "Town Hall", "1 Main St").await;
        let topic = add_topic(&ctx.store, "Rust").await;
        add_event(
            &ctx.store,
            &types,
            "Later",
            "2099-05-01T10:00:00Z",
            "2099-05-01T12:00:00Z",
            Some(&venue),
            &[&topic],
        )
        .await;
        add_event(
            &ctx.store,
            &types,
            "Sooner",
            "2099-01-01T10:00:00Z",
            "2099-01-01T12:00:00Z",
            None,
            &[],
        )
        .await;
        add_event(
            &ctx.store,
            &types,
            "Finished",
            "2001-01-01T10:00:00Z",
            "2001-01-01T12:00:00Z",
            None,
            &[],
        )
        .await;

        let response = ctx
            .app
            .oneshot(get("/api/calendar/feed?format=html&filter=upcoming"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );

        let body = body_to_string(response.into_body()).await;
        let sooner = body.find("Sooner").unwrap();
        let later = body.find("Later").unwrap();
        assert!(sooner < later);
        assert!(!body.contains("Finished"));
        assert!(body.contains("2099-05-01 10:00"));
        assert!(body.contains("Town Hall"));
        assert!(body.contains(&format!(r#"<a href="/topic/{}">Rust</a>"#, topic)));
    }

    /// Tests the json feed includes past events without a link
    #[tokio::test]
    #[serial]
    async fn it_renders_json_feed() {
        let ctx = test_context().await;
        let types = install(&ctx.store).await;
        let upcoming = add_event(
            &ctx.store,
            &types,
            "Upcoming",
            "2099-01-01T10:00:00Z",
            "2099-01-01T12:00:00Z",
            None,
            &[],
        )
        .await;
        add_event(
            &ctx.store,
            &types,
            "Finished",
            "2001-01-01T10:00:00Z",
            "2001-01-01T12:00:00Z",
            None,
            &[],
        )
        .await;

        let response = ctx
            .app
            .oneshot(get("/api/calendar/feed?format=json&filter=all"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let body = body_to_string(response.into_body()).await;
        let entries: Vec<Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["title"], "Finished");
        assert!(entries[0]["url"].is_null());
        assert_eq!(entries[0]["start"], 978_343_200_000i64);
        assert_eq!(entries[1]["title"], "Upcoming");
        assert!(entries[1]["url"].as_str().unwrap().contains(&upcoming));
    }

    /// Tests an unknown feed format is rejected
    #[tokio::test]
    #[serial]
    async fn it_returns_400_for_unknown_format() {
        let ctx = test_context().await;

        let response = ctx
            .app
            .oneshot(get("/api/calendar/feed?format=xml"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests settings default and can be updated
    #[tokio::test]
    #[serial]
    async fn it_gets_and_updates_settings() {
        let ctx = test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(get("/api/calendar/settings"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("\"calendar_css\":\"\""));
        assert!(body.contains("\"display_as_list\":false"));

        let response = ctx
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/settings")
                    .method("PUT")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "calendar_css": ".event { color: red; }",
                            "display_as_list": true
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = ctx
            .app
            .oneshot(get("/api/calendar/settings"))
            .await
            .unwrap();
        let body = body_to_string(response.into_body()).await;
        assert!(body.contains(".event { color: red; }"));
        assert!(body.contains("\"display_as_list\":true"));
    }

    /// Tests installing twice registers the admin nav once per type
    #[tokio::test]
    #[serial]
    async fn it_installs_and_registers_nav() {
        let ctx = test_context().await;

        let response = ctx
            .app
            .clone()
            .oneshot(get("/api/calendar/nav"))
            .await
            .unwrap();
        assert_eq!(body_to_string(response.into_body()).await, "[]");

        for _ in 0..2 {
            let response = ctx
                .app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/calendar/install")
                        .method("POST")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = ctx.app.oneshot(get("/api/calendar/nav")).await.unwrap();
        let body = body_to_string(response.into_body()).await;
        let items: Vec<Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "Events");
        assert_eq!(items[1]["title"], "Venues");
    }

    /// Tests the calendar page is rendered with the template helpers
    #[tokio::test]
    #[serial]
    async fn it_renders_calendar_page() {
        let ctx = test_context().await;
        let types = install(&ctx.store).await;
        add_event(
            &ctx.store,
            &types,
            "Launch Party",
            "2099-01-01T10:00:00Z",
            "2099-01-01T12:00:00Z",
            None,
            &[],
        )
        .await;

        let response = ctx
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/calendar/settings")
                    .method("PUT")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "calendar_css": "#calendar { width: 100%; }",
                            "display_as_list": true
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = ctx.app.oneshot(get("/calendar")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response.into_body()).await;
        assert!(body.contains("<style>#calendar { width: 100%; }</style>"));
        assert!(body.contains(r#"<div id="calendar" style="display: none">"#));
        assert!(body.contains(r#"<h3 class="calendar-event-name">"#));
        assert!(body.contains("var calendarEvents = [{\"title\":\"Launch Party\""));
        assert!(!body.contains("^pb_"));
    }
}
