use crate::chart::{Bar, CHART_HEIGHT, CHART_PADDING, CHART_WIDTH};
use crate::models::{FieldErrors, SignupRequest};
use std::fmt::Write;

pub fn render_dashboard(
    date: &str,
    total_visits: u64,
    today_visits: u64,
    registered_users: u64,
    year: i32,
    bars: &[Bar],
) -> String {
    DASHBOARD_HTML
        .replace("{{DATE}}", date)
        .replace("{{TOTAL}}", &group_digits(total_visits))
        .replace("{{TODAY}}", &group_digits(today_visits))
        .replace("{{USERS}}", &group_digits(registered_users))
        .replace("{{YEAR}}", &year.to_string())
        .replace("{{CHART}}", &render_chart_svg(bars))
}

pub fn render_signup(request: &SignupRequest, errors: &FieldErrors, created: bool) -> String {
    let error_for = |field: &str| {
        errors
            .get(field)
            .map(|msg| escape_html(msg))
            .unwrap_or_default()
    };

    SIGNUP_HTML
        .replace("{{NAME}}", &escape_html(request.name.trim()))
        .replace("{{EMAIL}}", &escape_html(request.email.trim()))
        .replace("{{ERR_NAME}}", &error_for("name"))
        .replace("{{ERR_EMAIL}}", &error_for("email"))
        .replace("{{ERR_PASSWORD}}", &error_for("password"))
        .replace("{{ERR_CONFIRM}}", &error_for("confirm"))
        .replace(
            "{{SUCCESS_ATTR}}",
            if created { "" } else { " hidden" },
        )
}

/// Serialize the computed bar layout into the dashboard's inline SVG:
/// two axis lines, one rect per bar, one tick label per bar.
fn render_chart_svg(bars: &[Bar]) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg id="visits-chart" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" role="img" aria-label="Visits per day">"#
    );

    let baseline = CHART_HEIGHT - CHART_PADDING;
    let _ = write!(
        svg,
        r#"<line class="axis" x1="{CHART_PADDING}" y1="{baseline}" x2="{x2}" y2="{baseline}" /><line class="axis" x1="{CHART_PADDING}" y1="{CHART_PADDING}" x2="{CHART_PADDING}" y2="{baseline}" />"#,
        x2 = CHART_WIDTH - CHART_PADDING,
    );

    for bar in bars {
        let _ = write!(
            svg,
            r#"<rect class="bar" x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}"><title>{date}: {value}</title></rect>"#,
            x = bar.x,
            y = bar.y,
            w = bar.width,
            h = bar.height,
            date = bar.label,
            value = bar.value,
        );
        let _ = write!(
            svg,
            r#"<text class="tick" x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            x = bar.x + bar.width / 2.0,
            y = baseline + 16.0,
            label = bar.label,
        );
    }

    let _ = write!(
        svg,
        r#"<text class="title" x="{CHART_PADDING}" y="{y}">Visits per day</text></svg>"#,
        y = CHART_PADDING - 10.0,
    );
    svg
}

/// `1234567` -> `1,234,567`.
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Visit Tracker</title>
  <style>
    :root {
      --bg-1: #10151c;
      --bg-2: #1b2430;
      --ink: #e9f1f7;
      --accent: #6aa8ff;
      --muted: rgba(233, 241, 247, 0.6);
      --card: rgba(255, 255, 255, 0.05);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: system-ui, "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border: 1px solid rgba(255, 255, 255, 0.08);
      border-radius: 20px;
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 3vw, 2.2rem);
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 14px;
    }

    .stat {
      background: rgba(255, 255, 255, 0.04);
      border: 1px solid rgba(255, 255, 255, 0.08);
      border-radius: 14px;
      padding: 16px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    .chart-card {
      background: rgba(255, 255, 255, 0.04);
      border: 1px solid rgba(255, 255, 255, 0.08);
      border-radius: 14px;
      padding: 12px;
    }

    #visits-chart {
      width: 100%;
      display: block;
    }

    #visits-chart .bar {
      fill: var(--accent);
    }

    #visits-chart .axis {
      stroke: rgba(255, 255, 255, 0.2);
      stroke-width: 1;
    }

    #visits-chart .tick,
    #visits-chart .title {
      fill: rgba(233, 241, 247, 0.9);
      font-size: 12px;
    }

    footer {
      color: var(--muted);
      font-size: 0.85rem;
    }

    a {
      color: var(--accent);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Visit Tracker</h1>
      <p class="subtitle">Every view of this page counts. Today is {{DATE}}.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total visits</span>
        <span id="total-visits" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Visits today</span>
        <span id="today-visits" class="value">{{TODAY}}</span>
      </div>
      <div class="stat">
        <span class="label">Registered users</span>
        <span id="registered-users" class="value">{{USERS}}</span>
      </div>
    </section>

    <section class="chart-card">
      {{CHART}}
    </section>

    <footer>
      <a href="/signup">Sign up</a> &middot; &copy; <span id="year">{{YEAR}}</span>
    </footer>
  </main>
</body>
</html>
"#;

const SIGNUP_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sign up - Visit Tracker</title>
  <style>
    :root {
      --bg-1: #10151c;
      --bg-2: #1b2430;
      --ink: #e9f1f7;
      --accent: #6aa8ff;
      --muted: rgba(233, 241, 247, 0.6);
      --error: #ff7a6a;
      --ok: #6ee7a0;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: system-ui, "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .card {
      width: min(440px, 100%);
      background: rgba(255, 255, 255, 0.05);
      border: 1px solid rgba(255, 255, 255, 0.08);
      border-radius: 20px;
      padding: 32px;
      display: grid;
      gap: 18px;
    }

    h1 {
      margin: 0;
      font-size: 1.6rem;
    }

    form {
      display: grid;
      gap: 14px;
    }

    .field {
      display: grid;
      gap: 4px;
    }

    label {
      font-size: 0.85rem;
      color: var(--muted);
    }

    input {
      background: rgba(255, 255, 255, 0.06);
      border: 1px solid rgba(255, 255, 255, 0.14);
      border-radius: 10px;
      color: var(--ink);
      padding: 10px 12px;
      font-size: 1rem;
    }

    .error {
      min-height: 1em;
      font-size: 0.8rem;
      color: var(--error);
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 1rem;
      font-weight: 600;
      background: var(--accent);
      color: #0c1117;
      cursor: pointer;
    }

    .success {
      border: 1px solid rgba(110, 231, 160, 0.4);
      border-radius: 10px;
      padding: 12px;
      color: var(--ok);
    }

    a {
      color: var(--accent);
      font-size: 0.85rem;
    }
  </style>
</head>
<body>
  <main class="card">
    <h1>Create an account</h1>

    <div id="success-box" class="success"{{SUCCESS_ATTR}}>Account created. Welcome aboard!</div>

    <form id="signup-form" method="post" action="/signup" novalidate>
      <div class="field">
        <label for="name">Full name</label>
        <input id="name" name="name" type="text" value="{{NAME}}" />
        <span class="error" data-error-for="name">{{ERR_NAME}}</span>
      </div>
      <div class="field">
        <label for="email">Email</label>
        <input id="email" name="email" type="email" value="{{EMAIL}}" />
        <span class="error" data-error-for="email">{{ERR_EMAIL}}</span>
      </div>
      <div class="field">
        <label for="password">Password</label>
        <input id="password" name="password" type="password" />
        <span class="error" data-error-for="password">{{ERR_PASSWORD}}</span>
      </div>
      <div class="field">
        <label for="confirm">Confirm password</label>
        <input id="confirm" name="confirm" type="password" />
        <span class="error" data-error-for="confirm">{{ERR_CONFIRM}}</span>
      </div>
      <button type="submit">Sign up</button>
    </form>

    <a href="/">Back to dashboard</a>
  </main>
</body>
</html>
"#;
