//! Status page served at `GET /`.
//!
//! Polls `/status` every 2 s; −/+ buttons, a 0–100 slider, and a mode
//! toggle call the other routes.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Smart Irrigation System</title>
<style>
  body { font: 16px/1.4 system-ui, sans-serif; margin: 0; min-height: 100vh;
         display: flex; align-items: center; justify-content: center; background: #eef3f7; }
  .panel { background: #fff; border-radius: 14px; padding: 24px; width: 90%; max-width: 480px;
           box-shadow: 0 8px 24px #0002; text-align: center; }
  h1 { margin: 0 0 16px; color: #23384d; font-weight: 600; }
  .card { background: #e9eef2; border-radius: 10px; padding: 12px; margin-bottom: 16px; }
  .lbl { font-weight: 600; color: #34495e; }
  .row { display: flex; align-items: center; gap: 12px; margin-bottom: 16px; }
  .row input { flex: 1; }
  button { font-size: 16px; padding: 10px 18px; border: 0; border-radius: 6px;
           background: #3a8dde; color: #fff; cursor: pointer; }
  button:active { transform: translateY(1px); }
  #mode { background: #2fb86a; }
</style>
</head>
<body>
<div class="panel">
  <h1>Smart Irrigation System</h1>
  <div class="card">
    <p><span class="lbl">Soil Moisture:</span> <span id="moisture">--</span></p>
    <p><span class="lbl">System Status:</span> <span id="status">--</span></p>
  </div>
  <div class="row">
    <span>Threshold: <span id="threshold">--</span></span>
    <input type="range" id="slider" min="0" max="100" value="40"
           onchange="setThreshold(this.value)">
  </div>
  <div>
    <button onclick="step('decrease')">-</button>
    <button onclick="step('increase')">+</button>
    <button id="mode" onclick="toggleMode()">Toggle Mode</button>
  </div>
</div>
<script>
  async function refresh() {
    try {
      const r = await fetch('/status');
      const d = await r.json();
      document.getElementById('moisture').textContent = d.moisture + '%';
      document.getElementById('threshold').textContent = d.threshold + '%';
      document.getElementById('slider').value = d.threshold;
      document.getElementById('status').textContent = d.status;
    } catch (e) {}
  }
  async function step(action) { await fetch('/threshold?action=' + action); refresh(); }
  async function setThreshold(v) { await fetch('/threshold?value=' + v); refresh(); }
  async function toggleMode() { await fetch('/toggle-mode'); refresh(); }
  setInterval(refresh, 2000);
  refresh();
</script>
</body>
</html>
"#;
