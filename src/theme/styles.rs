//! Global CSS styles for cardforge.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* SURFACES */
  --slate: #15161a;
  --slate-raised: #1f2127;
  --slate-border: #2e313a;

  /* TEXT */
  --parchment: #f4f1ea;
  --parchment-dim: rgba(244, 241, 234, 0.7);
  --parchment-muted: rgba(244, 241, 234, 0.45);

  /* ACCENTS */
  --ember: #e25822;
  --ember-glow: rgba(226, 88, 34, 0.35);
  --brass: #c9a54a;

  /* SEMANTIC */
  --danger: #ff4d5e;
  --warning: #ffb020;
  --success: #5fbf7a;

  /* Typography */
  --font-serif: 'Cormorant Garamond', Georgia, serif;
  --font-sans: 'Inter', 'Segoe UI', system-ui, sans-serif;
  --font-mono: 'JetBrains Mono', 'SF Mono', 'Consolas', monospace;

  /* Type Scale */
  --text-xs: 0.75rem;
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.125rem;
  --text-xl: 1.5rem;

  /* Transitions */
  --transition-fast: 150ms ease;
  --transition-normal: 300ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  font-size: 15px;
  -webkit-font-smoothing: antialiased;
}

body {
  font-family: var(--font-sans);
  background: var(--slate);
  color: var(--parchment);
  line-height: 1.5;
  min-height: 100vh;
}

/* === Navigation Header === */
.nav-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.75rem 1.5rem;
  border-bottom: 1px solid var(--slate-border);
  background: var(--slate-raised);
}

.nav-title {
  font-family: var(--font-serif);
  font-size: var(--text-xl);
  color: var(--brass);
  letter-spacing: 0.08em;
}

.nav-links {
  display: flex;
  gap: 0.5rem;
}

.nav-link {
  padding: 0.35rem 0.9rem;
  border: 1px solid transparent;
  border-radius: 999px;
  color: var(--parchment-dim);
  text-decoration: none;
  font-size: var(--text-sm);
  transition: all var(--transition-fast);
}

.nav-link:hover {
  color: var(--parchment);
  border-color: var(--slate-border);
}

.nav-link--active {
  color: var(--ember);
  border-color: var(--ember);
  box-shadow: 0 0 12px var(--ember-glow);
}

.nav-status {
  font-family: var(--font-mono);
  font-size: var(--text-xs);
  color: var(--parchment-muted);
}

/* === Notices === */
.notice-stack {
  position: fixed;
  right: 1rem;
  bottom: 1rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  max-width: 28rem;
  z-index: 10;
}

.notice {
  display: flex;
  align-items: flex-start;
  gap: 0.75rem;
  padding: 0.6rem 0.9rem;
  border-left: 3px solid var(--success);
  border-radius: 4px;
  background: var(--slate-raised);
  font-size: var(--text-sm);
}

.notice--error {
  border-left-color: var(--warning);
}

.notice__text {
  flex: 1;
}

.notice__dismiss {
  background: none;
  border: none;
  color: var(--parchment-muted);
  cursor: pointer;
}

/* === Workbench Layout === */
.workbench {
  display: grid;
  grid-template-columns: 22rem 1fr 18rem;
  gap: 1rem;
  padding: 1rem;
  height: calc(100vh - 3.5rem);
}

.workbench--wide {
  grid-template-columns: 24rem 1fr;
}

.panel {
  display: flex;
  flex-direction: column;
  gap: 0.75rem;
  padding: 1rem;
  border: 1px solid var(--slate-border);
  border-radius: 8px;
  background: var(--slate-raised);
  overflow-y: auto;
}

.panel__title {
  font-family: var(--font-serif);
  font-size: var(--text-lg);
  font-style: italic;
  color: var(--brass);
}

.panel__empty {
  color: var(--parchment-muted);
  font-size: var(--text-sm);
}

/* === Forms === */
.form-field {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
}

.form-field label {
  font-size: var(--text-xs);
  text-transform: uppercase;
  letter-spacing: 0.06em;
  color: var(--parchment-dim);
}

.form-row {
  display: flex;
  gap: 0.5rem;
  align-items: flex-end;
}

.form-row .form-field {
  flex: 1;
}

input, textarea, select {
  width: 100%;
  padding: 0.45rem 0.6rem;
  border: 1px solid var(--slate-border);
  border-radius: 4px;
  background: var(--slate);
  color: var(--parchment);
  font-family: inherit;
  font-size: var(--text-sm);
}

input[type="checkbox"] {
  width: auto;
}

input[type="color"] {
  height: 2.1rem;
  padding: 0.1rem;
}

textarea {
  min-height: 6rem;
  resize: vertical;
}

input:focus, textarea:focus, select:focus {
  outline: none;
  border-color: var(--ember);
}

.hint {
  font-size: var(--text-xs);
  color: var(--parchment-muted);
}

/* === Buttons === */
.toolbar {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
}

.btn {
  padding: 0.45rem 0.9rem;
  border: 1px solid var(--slate-border);
  border-radius: 4px;
  background: var(--slate);
  color: var(--parchment);
  font-size: var(--text-sm);
  cursor: pointer;
  transition: all var(--transition-fast);
}

.btn:hover:not(:disabled) {
  border-color: var(--parchment-dim);
}

.btn:disabled {
  opacity: 0.5;
  cursor: default;
}

.btn--primary {
  border-color: var(--ember);
  background: var(--ember);
  color: #fff;
}

.btn--primary:hover:not(:disabled) {
  box-shadow: 0 0 12px var(--ember-glow);
}

.btn--danger {
  color: var(--danger);
}

.btn--small {
  padding: 0.2rem 0.5rem;
  font-size: var(--text-xs);
}

/* === Preview === */
.preview {
  display: flex;
  align-items: center;
  justify-content: center;
  min-height: 0;
}

.preview svg {
  max-width: 100%;
  max-height: 100%;
  height: auto;
  border-radius: 12px;
  box-shadow: 0 12px 40px rgba(0, 0, 0, 0.6);
}

.preview--card svg {
  aspect-ratio: 750 / 1050;
  height: 100%;
}

.preview--page svg {
  aspect-ratio: 1920 / 1080;
  width: 100%;
}

/* === Saved Cards === */
.saved-list {
  display: flex;
  flex-direction: column;
  gap: 0.4rem;
  list-style: none;
}

.saved-item {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  padding: 0.4rem 0.6rem;
  border: 1px solid var(--slate-border);
  border-left: 4px solid var(--accent, var(--ember));
  border-radius: 4px;
}

.saved-item--active {
  background: var(--slate);
  border-color: var(--ember);
}

.saved-item__text {
  flex: 1;
  min-width: 0;
  display: flex;
  flex-direction: column;
}

.saved-item__excerpt {
  font-size: var(--text-xs);
  color: var(--parchment-muted);
  overflow: hidden;
  text-overflow: ellipsis;
  white-space: nowrap;
}

.saved-item__excerpt .inline-icon {
  height: 1em;
  vertical-align: middle;
}

.saved-item__title {
  overflow: hidden;
  text-overflow: ellipsis;
  white-space: nowrap;
}

.saved-item__template {
  font-size: var(--text-xs);
  color: var(--parchment-muted);
}

/* === Icon Picker === */
.icon-picker {
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
}

.icon-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(3rem, 1fr));
  gap: 0.35rem;
  max-height: 12rem;
  overflow-y: auto;
}

.icon-tile {
  display: flex;
  align-items: center;
  justify-content: center;
  aspect-ratio: 1;
  padding: 0.25rem;
  border: 1px solid var(--slate-border);
  border-radius: 4px;
  background: var(--slate);
  cursor: pointer;
}

.icon-tile img {
  max-width: 100%;
  max-height: 100%;
}

.icon-tile--selected {
  border-color: var(--ember);
  box-shadow: 0 0 8px var(--ember-glow);
}

/* === Skills === */
.skill-chips {
  display: flex;
  flex-wrap: wrap;
  gap: 0.35rem;
}

.skill-chip {
  padding: 0.15rem 0.6rem;
  border: 1px solid var(--slate-border);
  border-radius: 999px;
  background: none;
  color: var(--parchment-dim);
  font-size: var(--text-xs);
  cursor: pointer;
}

.skill-chip--on {
  border-color: var(--ember);
  background: var(--ember);
  color: #fff;
}

/* === Tutorial Pages === */
.page-tabs {
  display: flex;
  flex-wrap: wrap;
  gap: 0.35rem;
}

.page-tab {
  min-width: 2.2rem;
  padding: 0.3rem 0.6rem;
  border: 1px solid var(--slate-border);
  border-radius: 4px;
  background: var(--slate);
  color: var(--parchment-dim);
  cursor: pointer;
}

.page-tab--active {
  border-color: var(--ember);
  color: var(--parchment);
}

.block-editor {
  display: flex;
  flex-direction: column;
  gap: 0.4rem;
  padding: 0.6rem;
  border: 1px dashed var(--slate-border);
  border-radius: 6px;
}

.block-editor__header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  font-size: var(--text-xs);
  color: var(--parchment-dim);
}

.page-stage {
  display: flex;
  flex-direction: column;
  gap: 1rem;
  min-height: 0;
}

/* === Image Upload === */
.image-upload {
  display: flex;
  flex-direction: column;
  gap: 0.25rem;
}

.image-upload-btn {
  padding: 0.45rem 0.9rem;
  border: 1px dashed var(--parchment-muted);
  border-radius: 4px;
  background: none;
  color: var(--parchment-dim);
  cursor: pointer;
}

.image-upload-btn:hover:not(:disabled) {
  border-color: var(--ember);
  color: var(--parchment);
}

.image-upload__error {
  font-size: var(--text-xs);
  color: var(--danger);
}
"#;
