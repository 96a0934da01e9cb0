/// Dashboard page. Server-side templating is a single placeholder swap,
/// everything else is rendered client-side from `/api/dashboard`.
pub fn render_index(repository: &str) -> String {
    INDEX_HTML.replace("{{REPO}}", repository)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Repository Traffic</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=IBM+Plex+Sans:wght@400;500;600&family=IBM+Plex+Mono:wght@500&display=swap');

    :root {
      --bg: #0f1722;
      --panel: #18222f;
      --line: rgba(125, 165, 210, 0.16);
      --ink: #e8eef5;
      --muted: #8ba1b7;
      --views: #4cc2ff;
      --visitors: #8f7dff;
      --clones: #3fd68f;
      --cloners: #ffb454;
      --danger: #ff6470;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "IBM Plex Sans", "Segoe UI", sans-serif;
      padding: 28px 16px 56px;
      display: flex;
      justify-content: center;
    }

    .app {
      width: min(980px, 100%);
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-size: 1.6rem;
      font-weight: 600;
    }

    .origin {
      font-family: "IBM Plex Mono", monospace;
      font-size: 0.78rem;
      padding: 4px 10px;
      border-radius: 999px;
      border: 1px solid var(--line);
      color: var(--muted);
    }

    .origin[data-origin="synthetic"] {
      color: var(--cloners);
      border-color: rgba(255, 180, 84, 0.4);
    }

    .repo-form {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    input[type="text"],
    input[type="date"] {
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 8px;
      color: var(--ink);
      padding: 8px 12px;
      font: inherit;
    }

    input[type="text"] {
      min-width: 240px;
    }

    button,
    .btn {
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 8px;
      color: var(--ink);
      padding: 8px 14px;
      font: inherit;
      font-weight: 500;
      cursor: pointer;
      text-decoration: none;
      display: inline-flex;
      align-items: center;
    }

    button:hover,
    .btn:hover {
      border-color: rgba(125, 165, 210, 0.45);
    }

    button.primary {
      background: var(--views);
      border-color: var(--views);
      color: #06202e;
    }

    button.active {
      border-color: var(--views);
      color: var(--views);
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 14px;
    }

    .card {
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 16px 18px;
      display: grid;
      gap: 6px;
    }

    .card .label {
      font-size: 0.78rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .card .value {
      font-size: 1.6rem;
      font-weight: 600;
      font-variant-numeric: tabular-nums;
    }

    .card .sub {
      font-size: 0.8rem;
      color: var(--muted);
    }

    .panel {
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 18px;
      display: grid;
      gap: 14px;
    }

    .panel h2 {
      margin: 0;
      font-size: 1.05rem;
      font-weight: 600;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .controls .group {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 8px;
    }

    .controls label {
      font-size: 0.85rem;
      color: var(--muted);
    }

    #chart {
      width: 100%;
      height: 280px;
      display: block;
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
      font-family: "IBM Plex Mono", monospace;
    }

    .chart-line {
      fill: none;
      stroke-width: 2.5;
    }

    .chart-point {
      stroke-width: 2;
      fill: var(--panel);
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 14px;
      font-size: 0.82rem;
      color: var(--muted);
    }

    .legend .swatch {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 2px;
      margin-right: 6px;
    }

    .referrers {
      display: grid;
      gap: 10px;
    }

    .referrer {
      display: grid;
      grid-template-columns: minmax(140px, 1fr) 3fr auto;
      align-items: center;
      gap: 12px;
      font-size: 0.9rem;
    }

    .referrer .bar {
      height: 10px;
      border-radius: 999px;
      background: rgba(76, 194, 255, 0.12);
      overflow: hidden;
    }

    .referrer .bar span {
      display: block;
      height: 100%;
      background: var(--views);
      border-radius: 999px;
    }

    .referrer .count {
      font-family: "IBM Plex Mono", monospace;
      color: var(--muted);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.88rem;
      font-variant-numeric: tabular-nums;
    }

    th, td {
      text-align: right;
      padding: 8px 10px;
      border-bottom: 1px solid var(--line);
    }

    th:first-child, td:first-child {
      text-align: left;
      font-family: "IBM Plex Mono", monospace;
    }

    th {
      color: var(--muted);
      font-weight: 500;
      text-transform: uppercase;
      font-size: 0.72rem;
      letter-spacing: 0.08em;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.88rem;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .empty {
      color: var(--muted);
      font-size: 0.9rem;
    }

    @media (max-width: 640px) {
      .referrer {
        grid-template-columns: 1fr auto;
      }
      .referrer .bar {
        display: none;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Repository Traffic</h1>
        <span id="repo-name" class="status">{{REPO}}</span>
      </div>
      <span id="origin" class="origin">loading</span>
    </header>

    <form id="repo-form" class="repo-form">
      <input type="text" id="repo-input" placeholder="owner/name" value="{{REPO}}" autocomplete="off" />
      <button class="primary" type="submit">Load</button>
    </form>

    <section class="cards">
      <div class="card">
        <span class="label">Views</span>
        <span class="value" id="total-views">0</span>
        <span class="sub" id="avg-views"></span>
      </div>
      <div class="card">
        <span class="label">Unique visitors</span>
        <span class="value" id="total-visitors">0</span>
        <span class="sub" id="avg-visitors"></span>
      </div>
      <div class="card">
        <span class="label">Clones</span>
        <span class="value" id="total-clones">0</span>
        <span class="sub" id="peak-day"></span>
      </div>
      <div class="card">
        <span class="label">Unique cloners</span>
        <span class="value" id="total-cloners">0</span>
        <span class="sub" id="days-with-data"></span>
      </div>
    </section>

    <section class="panel">
      <div class="controls">
        <div class="group" id="range-presets">
          <button type="button" data-days="7">7d</button>
          <button type="button" data-days="30">30d</button>
          <button type="button" data-days="90">90d</button>
          <button type="button" data-days="all" class="active">All</button>
        </div>
        <div class="group">
          <label for="from">From</label>
          <input type="date" id="from" />
          <label for="to">To</label>
          <input type="date" id="to" />
        </div>
        <div class="group" id="view-tabs">
          <button type="button" data-view="daily" class="active">Daily</button>
          <button type="button" data-view="monthly">Monthly</button>
        </div>
      </div>
      <svg id="chart" viewBox="0 0 920 280" role="img" aria-label="Traffic chart"></svg>
      <div class="legend" id="legend"></div>
    </section>

    <section class="panel">
      <h2>Top referrers</h2>
      <div class="referrers" id="referrers"></div>
    </section>

    <section class="panel">
      <div class="controls">
        <h2>Daily data</h2>
        <a class="btn" id="export-link" href="/export.csv" download>Export CSV</a>
      </div>
      <table>
        <thead>
          <tr><th>Date</th><th>Views</th><th>Unique visitors</th><th>Clones</th><th>Unique cloners</th></tr>
        </thead>
        <tbody id="table-body"></tbody>
      </table>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const METRICS = [
      { key: 'views', label: 'Views', color: 'var(--views)' },
      { key: 'unique_visitors', label: 'Unique visitors', color: 'var(--visitors)' },
      { key: 'clones', label: 'Clones', color: 'var(--clones)' },
      { key: 'unique_cloners', label: 'Unique cloners', color: 'var(--cloners)' }
    ];

    const el = (id) => document.getElementById(id);
    const statusEl = el('status');
    const chartEl = el('chart');
    const fromEl = el('from');
    const toEl = el('to');

    let dashboard = null;
    let activeView = 'daily';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const inRange = (date) => {
      if (fromEl.value && date < fromEl.value) return false;
      if (toEl.value && date > toEl.value) return false;
      return true;
    };

    const visibleDates = () =>
      Object.keys(dashboard.series).filter(inRange).sort();

    const renderCards = () => {
      const s = dashboard.summary;
      el('total-views').textContent = s.total_views.toLocaleString();
      el('total-visitors').textContent = s.total_visitors.toLocaleString();
      el('total-clones').textContent = s.total_clones.toLocaleString();
      el('total-cloners').textContent = s.total_unique_cloners.toLocaleString();
      el('avg-views').textContent = `${s.avg_daily_views.toFixed(1)} / day`;
      el('avg-visitors').textContent = `${s.avg_daily_visitors.toFixed(1)} / day`;
      el('peak-day').textContent = s.peak_views_day
        ? `peak ${s.peak_views_count} on ${s.peak_views_day}`
        : '';
      el('days-with-data').textContent = `${s.days_with_data} days of data`;
    };

    const chartRows = () => {
      if (activeView === 'monthly') {
        return Object.entries(dashboard.monthly)
          .filter(([month]) => {
            if (fromEl.value && month < fromEl.value.slice(0, 7)) return false;
            if (toEl.value && month > toEl.value.slice(0, 7)) return false;
            return true;
          })
          .map(([label, record]) => ({ label, record }));
      }
      return visibleDates().map((date) => ({
        label: date.slice(5),
        record: dashboard.series[date]
      }));
    };

    const renderChart = () => {
      const rows = chartRows();
      if (!rows.length) {
        chartEl.innerHTML =
          '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data in range</text>';
        return;
      }

      const width = 920;
      const height = 280;
      const padX = 52;
      const padY = 36;
      const top = 18;

      let max = 0;
      rows.forEach(({ record }) => {
        METRICS.forEach(({ key }) => {
          max = Math.max(max, record[key]);
        });
      });
      if (max === 0) max = 1;

      const xStep = rows.length > 1 ? (width - padX * 2) / (rows.length - 1) : 0;
      const x = (i) => padX + i * xStep;
      const y = (v) => height - padY - (v / max) * (height - padY - top);

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${padX}" y1="${yPos}" x2="${width - padX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${padX - 10}" y="${yPos + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const labelEvery = Math.max(1, Math.ceil(rows.length / 12));
      const xLabels = rows
        .map(({ label }, i) =>
          i % labelEvery === 0
            ? `<text class="chart-label" x="${x(i)}" y="${height - padY + 18}" text-anchor="middle">${label}</text>`
            : ''
        )
        .join('');

      const lines = METRICS.map(({ key, color }) => {
        const path = rows
          .map(({ record }, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(1)} ${y(record[key]).toFixed(1)}`)
          .join(' ');
        const points =
          rows.length <= 40
            ? rows
                .map(({ record }, i) =>
                  `<circle class="chart-point" cx="${x(i)}" cy="${y(record[key])}" r="3" stroke="${color}" />`)
                .join('')
            : '';
        return `<path class="chart-line" stroke="${color}" d="${path}" />${points}`;
      }).join('');

      chartEl.innerHTML = grid + lines + xLabels;

      el('legend').innerHTML = METRICS.map(
        ({ label, color }) =>
          `<span><span class="swatch" style="background:${color}"></span>${label}</span>`
      ).join('');
    };

    const renderReferrers = () => {
      const target = el('referrers');
      if (!dashboard.referrers.length) {
        target.innerHTML = '<span class="empty">No referrer data.</span>';
        return;
      }
      target.innerHTML = dashboard.referrers
        .map(
          (r) => `
        <div class="referrer">
          <span>${r.referrer}</span>
          <span class="bar"><span style="width:${r.percentage.toFixed(1)}%"></span></span>
          <span class="count">${r.count}</span>
        </div>`
        )
        .join('');
    };

    const renderTable = () => {
      const body = el('table-body');
      body.innerHTML = visibleDates()
        .map((date) => {
          const r = dashboard.series[date];
          return `<tr><td>${date}</td><td>${r.views}</td><td>${r.unique_visitors}</td><td>${r.clones}</td><td>${r.unique_cloners}</td></tr>`;
        })
        .join('');
    };

    const updateExportLink = () => {
      const params = new URLSearchParams();
      if (fromEl.value) params.set('from', fromEl.value);
      if (toEl.value) params.set('to', toEl.value);
      const query = params.toString();
      el('export-link').href = query ? `/export.csv?${query}` : '/export.csv';
    };

    const renderAll = () => {
      if (!dashboard) return;
      el('repo-name').textContent = dashboard.repository;
      el('origin').textContent =
        dashboard.origin === 'synthetic' ? 'sample data' : 'live data';
      el('origin').dataset.origin = dashboard.origin;
      renderCards();
      renderChart();
      renderReferrers();
      renderTable();
      updateExportLink();
    };

    const applyPreset = (days) => {
      const dates = Object.keys(dashboard ? dashboard.series : {}).sort();
      if (days === 'all' || !dates.length) {
        fromEl.value = '';
        toEl.value = '';
      } else {
        const last = dates[dates.length - 1];
        const start = new Date(`${last}T00:00:00Z`);
        start.setUTCDate(start.getUTCDate() - (Number(days) - 1));
        fromEl.value = start.toISOString().slice(0, 10);
        toEl.value = last;
      }
      renderAll();
    };

    const loadDashboard = async () => {
      setStatus('Loading...');
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        throw new Error(await res.text() || 'Unable to load dashboard');
      }
      dashboard = await res.json();
      renderAll();
      setStatus('');
    };

    const selectRepository = async (repository) => {
      setStatus('Loading...');
      const res = await fetch('/api/repository', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ repository })
      });
      if (!res.ok) {
        throw new Error(await res.text() || 'Unable to load repository');
      }
      dashboard = await res.json();
      renderAll();
      setStatus('');
    };

    el('repo-form').addEventListener('submit', (event) => {
      event.preventDefault();
      selectRepository(el('repo-input').value.trim()).catch((err) =>
        setStatus(err.message, 'error')
      );
    });

    document.querySelectorAll('#range-presets button').forEach((button) => {
      button.addEventListener('click', () => {
        document
          .querySelectorAll('#range-presets button')
          .forEach((b) => b.classList.toggle('active', b === button));
        applyPreset(button.dataset.days);
      });
    });

    document.querySelectorAll('#view-tabs button').forEach((button) => {
      button.addEventListener('click', () => {
        activeView = button.dataset.view;
        document
          .querySelectorAll('#view-tabs button')
          .forEach((b) => b.classList.toggle('active', b === button));
        renderChart();
      });
    });

    [fromEl, toEl].forEach((input) => input.addEventListener('change', renderAll));

    loadDashboard().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
