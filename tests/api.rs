use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nrega_dashboard::dashboard::{DashboardScreen, Phase};
use nrega_dashboard::lang::Language;
use nrega_dashboard::metrics::Headline;
use nrega_dashboard::notice::Notice;
use nrega_dashboard::output::render_dashboard;
use nrega_dashboard::selector::SelectorScreen;
use nrega_dashboard::session::{LanguageSetting, Route};
use nrega_dashboard::ApiClient;

fn perf(year: i32, month: u32, active_workers: u64, wage: f64) -> Value {
    perf_for("RJ001", "Jaipur", year, month, active_workers, wage)
}

fn perf_for(
    district_code: &str,
    district_name: &str,
    year: i32,
    month: u32,
    active_workers: u64,
    wage: f64,
) -> Value {
    json!({
        "id": format!("{}-{}-{}", district_code, year, month),
        "state_code": "RJ",
        "state_name": "Rajasthan",
        "district_code": district_code,
        "district_name": district_name,
        "month": month,
        "year": year,
        "total_job_cards": 120000,
        "active_job_cards": 80000,
        "total_workers": 150000,
        "active_workers": active_workers,
        "person_days_generated": 1000000,
        "average_days_per_household": 42.5,
        "women_person_days": 400000,
        "sc_person_days": 200000,
        "st_person_days": 100000,
        "total_budget_allocated": 100000000.0,
        "total_expenditure": 70000000.0,
        "wage_expenditure": 50000000.0,
        "material_expenditure": 20000000.0,
        "average_wage_per_day": wage,
        "total_works": 1000,
        "completed_works": 600,
        "ongoing_works": 400,
        "updated_at": "2024-07-01T10:00:00Z"
    })
}

async fn server() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&format!("{}/api", server.uri())).unwrap();
    (server, client)
}

async fn mount_translations(server: &MockServer, lang: &str, title: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/translations/{}", lang)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "app_title": title })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn selector_loads_states_and_districts() {
    let (server, client) = server().await;
    mount_translations(&server, "en", "MGNREGA District Dashboard").await;
    Mock::given(method("GET"))
        .and(path("/api/states"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"state_code": "RJ", "state_name": "Rajasthan", "state_name_hi": "राजस्थान"},
            {"state_code": "UP", "state_name": "Uttar Pradesh", "state_name_hi": "उत्तर प्रदेश"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/districts/RJ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"district_code": "RJ001", "district_name": "Jaipur", "district_name_hi": "जयपुर",
             "state_code": "RJ", "state_name": "Rajasthan"}
        ])))
        .mount(&server)
        .await;

    let setting = LanguageSetting::new(Language::En);
    let mut screen = SelectorScreen::new(&setting);
    screen.mount(&client).await;
    assert_eq!(screen.states().len(), 2);
    assert_eq!(screen.labels().get("app_title"), "MGNREGA District Dashboard");

    assert!(screen.confirm().is_err());
    screen.select_state(&client, "RJ").await;
    assert_eq!(screen.districts().len(), 1);
    assert!(screen.select_district("RJ001"));
    assert_eq!(screen.confirm(), Ok(Route::Dashboard("RJ001".into())));
}

#[tokio::test]
async fn district_404_is_an_empty_list_but_500_is_a_notice() {
    let (server, client) = server().await;
    Mock::given(method("GET"))
        .and(path("/api/districts/GA"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "No districts found for this state"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/districts/XX"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let setting = LanguageSetting::new(Language::En);
    let mut screen = SelectorScreen::new(&setting);

    screen.select_state(&client, "GA").await;
    assert!(screen.districts().is_empty());
    assert!(screen.take_notices().is_empty());

    screen.select_state(&client, "XX").await;
    assert!(screen.districts().is_empty());
    let notices = screen.take_notices();
    assert!(matches!(
        notices.as_slice(),
        [Notice::LoadFailed { what: "districts", .. }]
    ));
}

#[tokio::test]
async fn unreachable_backend_leaves_states_empty() {
    // Nothing listens on port 9 on a test machine.
    let client = ApiClient::new("http://127.0.0.1:9/api").unwrap();
    let setting = LanguageSetting::new(Language::En);
    let mut screen = SelectorScreen::new(&setting);
    screen.mount(&client).await;
    assert!(screen.states().is_empty());
    assert_eq!(screen.take_notices().len(), 2);
}

#[tokio::test]
async fn dashboard_requests_twelve_months_and_compares_periods() {
    let (server, client) = server().await;
    mount_translations(&server, "en", "MGNREGA District Dashboard").await;
    Mock::given(method("GET"))
        .and(path("/api/performance/RJ001"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            perf(2024, 6, 55000, 260.0),
            perf(2024, 5, 50000, 250.0),
            perf(2024, 4, 48000, 245.0),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let setting = LanguageSetting::new(Language::En);
    let mut screen = DashboardScreen::new(&setting, "RJ001");
    screen.mount(&client).await;
    assert_eq!(screen.phase(), Phase::Loaded);

    let summary = screen.summary().unwrap();
    let change = |m: Headline| summary.headlines.iter().find(|h| h.metric == m).unwrap().change;
    assert_eq!(change(Headline::ActiveWorkers), Some(10.0));
    assert_eq!(change(Headline::AverageWage), Some(4.0));
    assert_eq!(change(Headline::PersonDays), Some(0.0));

    let text = render_dashboard(&screen);
    assert!(text.contains("+10.0%"));
    assert!(text.contains("₹260"));
    assert!(text.contains("Fair (yellow)"));
    assert!(text.contains("June 2024"));
    assert!(text.contains("April 2024"));
}

#[tokio::test]
async fn dashboard_404_renders_empty_state() {
    let (server, client) = server().await;
    mount_translations(&server, "en", "MGNREGA District Dashboard").await;
    Mock::given(method("GET"))
        .and(path("/api/performance/ZZ001"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "No performance data found"})))
        .mount(&server)
        .await;

    let setting = LanguageSetting::new(Language::En);
    let mut screen = DashboardScreen::new(&setting, "ZZ001");
    screen.mount(&client).await;
    assert_eq!(screen.phase(), Phase::Empty);
    assert!(screen.take_notices().is_empty());
    let text = render_dashboard(&screen);
    assert!(text.contains("No data available for this period"));
    assert!(!text.contains("Active Workers"));
}

#[tokio::test]
async fn language_change_refetches_labels_and_month_names() {
    let (server, client) = server().await;
    mount_translations(&server, "en", "MGNREGA District Dashboard").await;
    mount_translations(&server, "hi", "मनरेगा जिला डैशबोर्ड").await;
    Mock::given(method("GET"))
        .and(path("/api/performance/RJ001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([perf(2024, 6, 55000, 260.0)])))
        .mount(&server)
        .await;

    let setting = LanguageSetting::new(Language::En);
    let mut screen = DashboardScreen::new(&setting, "RJ001");
    screen.mount(&client).await;
    assert!(!screen.refresh_language(&client).await);

    setting.set(Language::Hi);
    assert!(screen.refresh_language(&client).await);
    assert_eq!(screen.labels().language(), Language::Hi);
    let text = render_dashboard(&screen);
    assert!(text.contains("मनरेगा जिला डैशबोर्ड"));
    assert!(text.contains("जून 2024"));
}

#[tokio::test]
async fn switching_district_refetches_and_drops_stale_results() {
    let (server, client) = server().await;
    mount_translations(&server, "en", "MGNREGA District Dashboard").await;
    Mock::given(method("GET"))
        .and(path("/api/performance/RJ001"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([perf(2024, 6, 55000, 260.0)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/performance/RJ002"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            perf_for("RJ002", "Jodhpur", 2024, 6, 30000, 240.0),
            perf_for("RJ002", "Jodhpur", 2024, 5, 28000, 235.0),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let setting = LanguageSetting::new(Language::En);
    let mut screen = DashboardScreen::new(&setting, "RJ001");
    screen.mount(&client).await;
    assert_eq!(screen.records()[0].district_name, "Jaipur");

    // a Jaipur reload still in flight when the user switches
    let stale = screen.begin_load();
    screen.change_district(&client, "RJ002").await;
    assert_eq!(screen.district_code(), "RJ002");
    assert_eq!(screen.phase(), Phase::Loaded);
    assert_eq!(screen.records().len(), 2);
    assert!(screen.records().iter().all(|r| r.district_code == "RJ002"));

    assert!(!screen.apply_records(stale, Ok(vec![])));
    assert_eq!(screen.phase(), Phase::Loaded);
    assert_eq!(screen.records()[0].district_name, "Jodhpur");
    assert!(render_dashboard(&screen).contains("₹240"));
}
