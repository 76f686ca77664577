//! Home page HTML.

use chrono::NaiveDateTime;

use crate::format::INPUT_DATE_TIME_FORMAT;
use crate::http::html_escape;
use crate::models::Action;

/// Banner shown after a form post without script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    Failed(String),
}

impl Notice {
    fn render(&self) -> String {
        match self {
            Notice::Submitted => {
                r#"<div class="notice ok" role="status">Data submitted successfully!</div>"#.to_string()
            }
            Notice::Failed(message) => format!(
                r#"<div class="notice err" role="alert">Erreur : {}</div>"#,
                html_escape(message)
            ),
        }
    }
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Baby data</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #f6f6f7; color: #111; }
  main { max-width: 32rem; margin: 0 auto; padding: 1rem; }
  .card { background: #fff; border: 1px solid #e4e4e7; border-radius: .5rem; padding: 1rem; margin-bottom: 1.5rem; }
  .card h2 { margin: 0 0 1rem; font-size: 1.25rem; }
  .field { margin-bottom: 1rem; }
  .field > label { display: block; font-weight: 600; margin-bottom: .25rem; }
  input[type=datetime-local] { width: 100%; padding: .5rem; box-sizing: border-box; }
  button { padding: .5rem 1rem; border: 0; border-radius: .375rem; background: #18181b; color: #fff; }
  button:disabled { opacity: .5; }
  .notice { padding: .75rem; border-radius: .375rem; margin-bottom: 1rem; }
  .ok { background: #dcfce7; }
  .err { background: #fee2e2; }
  #toast { position: fixed; right: 1rem; bottom: 1rem; display: none; background: #18181b; color: #fff; padding: .75rem 1rem; border-radius: .375rem; }
</style>
</head>
<body>
<main>
{{notice}}
<section class="card">
  <h2>Dernière tétée</h2>
  <div id="last-feed">Loading...</div>
</section>

<section class="card">
  <h2>Ajouter une tétée</h2>
  <form method="post" action="/" data-async>
    <div class="field">
      <label for="food-start">Date de début *</label>
      <input type="datetime-local" id="food-start" name="startDateTime" value="{{now}}" required>
    </div>
    <div class="field">
      <label for="food-end">Date de fin</label>
      <input type="datetime-local" id="food-end" name="endDateTime">
    </div>
    <button type="submit" name="_action" value="{{food}}">Valider</button>
  </form>
</section>

<section class="card">
  <h2>WC</h2>
  <form method="post" action="/" data-async>
    <div class="field">
      <label for="wc-start">Date *</label>
      <input type="datetime-local" id="wc-start" name="startDateTime" value="{{now}}" required>
    </div>
    <div class="field">
      <label>Pipi</label>
      <input type="radio" id="peed-yes" name="hasPeed" value="true" checked> <label for="peed-yes">Oui</label>
      <input type="radio" id="peed-no" name="hasPeed" value="false"> <label for="peed-no">Non</label>
    </div>
    <div class="field">
      <label>Caca</label>
      <input type="radio" id="pooped-yes" name="hasPooped" value="true" checked> <label for="pooped-yes">Oui</label>
      <input type="radio" id="pooped-no" name="hasPooped" value="false"> <label for="pooped-no">Non</label>
    </div>
    <button type="submit" name="_action" value="{{wc}}">Valider</button>
  </form>
</section>
</main>
<div id="toast" role="status"></div>
<script>
(function () {
  var toast = document.getElementById("toast");
  var hideTimer;
  function show(message) {
    toast.textContent = message;
    toast.style.display = "block";
    clearTimeout(hideTimer);
    hideTimer = setTimeout(function () { toast.style.display = "none"; }, 3000);
  }

  var lastFeed = document.getElementById("last-feed");
  fetch("/api/last-feed", { headers: { "Accept": "application/json" } })
    .then(function (r) { if (!r.ok) { throw r; } return r.json(); })
    .then(function (data) { lastFeed.textContent = data.lastFoodTime || "Aucune donnée"; })
    .catch(function () { lastFeed.textContent = "Aucune donnée"; });

  document.querySelectorAll("form[data-async]").forEach(function (form) {
    form.addEventListener("submit", function (event) {
      event.preventDefault();
      var button = event.submitter;
      var body = new URLSearchParams(new FormData(form, button));
      document.querySelectorAll("form[data-async] button").forEach(function (b) { b.disabled = true; });
      fetch("/", { method: "POST", headers: { "Accept": "application/json" }, body: body })
        .then(function (r) { return r.json().then(function (data) { return { ok: r.ok, data: data }; }); })
        .then(function (result) {
          if (result.ok && result.data.ok) {
            show("Data submitted successfully!");
          } else {
            show("Erreur : " + (result.data.errorCode || "unknown"));
          }
        })
        .catch(function () { show("Erreur : unknown"); })
        .finally(function () {
          document.querySelectorAll("form[data-async] button").forEach(function (b) { b.disabled = false; });
        });
    });
  });
})();
</script>
</body>
</html>
"#;

/// Render the home page. `now` pre-fills the date inputs.
pub fn render_home(now: &NaiveDateTime, notice: Option<&Notice>) -> String {
    TEMPLATE
        .replace("{{notice}}", &notice.map(Notice::render).unwrap_or_default())
        .replace("{{now}}", &now.format(INPUT_DATE_TIME_FORMAT).to_string())
        .replace("{{food}}", Action::Food.as_str())
        .replace("{{wc}}", Action::Wc.as_str())
}
