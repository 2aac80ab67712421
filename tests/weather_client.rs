// tests/weather_client.rs
use daily_brief::weather::{Coordinates, OpenWeatherClient, WeatherSource};
use daily_brief::{WeatherReport, WeatherUnavailable};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WARSAW_JSON: &str = include_str!("fixtures/weather_warsaw.json");

const COORDS: Coordinates = Coordinates { lat: 53.12, lon: 18.0 };

fn client(server: &MockServer, key: Option<&str>) -> OpenWeatherClient {
    OpenWeatherClient::new(server.uri(), key.map(str::to_string)).expect("client")
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for key in [None, Some("   ")] {
        let report = client(&server, key).fetch(COORDS).await;
        assert_eq!(
            report,
            WeatherReport::unavailable(WeatherUnavailable::MissingCredential)
        );
        assert!(report.to_prompt_text().contains("Brak klucza API OpenWeather"));
    }
}

#[tokio::test]
async fn success_is_normalized_with_one_decimal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", "secret"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "pl"))
        .and(query_param("lat", "53.12"))
        .and(query_param("lon", "18"))
        .respond_with(ResponseTemplate::new(200).set_body_string(WARSAW_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let report = client(&server, Some("secret")).fetch(COORDS).await;
    assert!(report.is_available());
    let text = report.available_text().unwrap();
    assert_eq!(
        text,
        "MIASTO: Warszawa\nOPIS: Zachmurzenie duże\nTEMP: 5.0°C (Odczuwalna: 2.0°C)\nWILGOTNOŚĆ: 87%\nWIATR: 4.12 m/s\n"
    );
}

#[tokio::test]
async fn service_error_carries_its_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
        )
        .mount(&server)
        .await;

    let report = client(&server, Some("bad")).fetch(COORDS).await;
    assert_eq!(report.to_prompt_text(), "Błąd API pogody: Invalid API key");
    assert!(report.available_text().is_none());
}

#[tokio::test]
async fn service_error_without_message_uses_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let report = client(&server, Some("k")).fetch(COORDS).await;
    assert_eq!(
        report,
        WeatherReport::unavailable(WeatherUnavailable::Service {
            message: "Nieznany błąd".into()
        })
    );
}

#[tokio::test]
async fn malformed_success_body_is_a_connection_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"main\": 1}"))
        .mount(&server)
        .await;

    let report = client(&server, Some("k")).fetch(COORDS).await;
    assert_eq!(
        report.to_prompt_text(),
        "Brak danych pogodowych (błąd połączenia)."
    );
}

#[tokio::test]
async fn unreachable_host_is_a_connection_fault() {
    // Port 9 (discard) on localhost: nothing listens there in CI.
    let client = OpenWeatherClient::new("http://127.0.0.1:9", Some("k".into())).unwrap();
    let report = client.fetch(COORDS).await;
    assert_eq!(
        report,
        WeatherReport::unavailable(WeatherUnavailable::Connection)
    );
}
