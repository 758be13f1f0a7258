/// Stylesheet embedded in every exported page
pub const STYLESHEET: &str = r#"
* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
  line-height: 1.6;
  color: #1f2937;
}
.blog-container {
  max-width: 48rem;
  margin: 0 auto;
  padding: 3rem 1.5rem;
}
.component {
  margin-bottom: 2rem;
}
h1 {
  font-size: 2.5rem;
  font-weight: bold;
  line-height: 1.2;
  margin-bottom: 1rem;
}
h2 {
  font-size: 2rem;
  font-weight: bold;
  margin-bottom: 0.5rem;
}
h3 {
  font-size: 1.5rem;
  font-weight: bold;
  margin-bottom: 0.5rem;
}
h4 {
  font-size: 1.25rem;
  font-weight: bold;
  margin-bottom: 0.5rem;
}
.header-eyebrow {
  text-transform: uppercase;
  font-size: 0.875rem;
  font-weight: 600;
  color: #6b7280;
  letter-spacing: 0.05em;
  margin-bottom: 0.5rem;
}
.header-meta {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  font-size: 0.875rem;
  color: #6b7280;
  margin-top: 1rem;
}
.header-lede {
  font-size: 1.25rem;
  color: #374151;
  line-height: 1.75;
  margin-top: 1rem;
}
.subheading {
  font-size: 0.875rem;
  font-weight: 600;
  color: #6b7280;
  text-transform: uppercase;
  letter-spacing: 0.05em;
}
.divider {
  border: 0;
  border-top: 1px solid #e5e7eb;
  margin: 1.5rem 0;
}
.divider-dashed { border-top-style: dashed; }
.divider-dotted { border-top-style: dotted; }
.divider-thick { border-top-width: 3px; }
.callout {
  border-left: 4px solid;
  padding: 1.5rem;
  border-radius: 0 0.5rem 0.5rem 0;
  margin: 1.5rem 0;
}
.callout-blue { background-color: #eff6ff; border-color: #93c5fd; color: #1e3a8a; }
.callout-green { background-color: #f0fdf4; border-color: #86efac; color: #14532d; }
.callout-yellow { background-color: #fefce8; border-color: #fde047; color: #713f12; }
.callout-red { background-color: #fef2f2; border-color: #fca5a5; color: #7f1d1d; }
.callout-gray { background-color: #f9fafb; border-color: #d1d5db; color: #1f2937; }
.card {
  border: 1px solid #e5e7eb;
  border-radius: 0.75rem;
  padding: 1.5rem;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
  margin: 1.5rem 0;
}
.card-title {
  font-size: 1.25rem;
  font-weight: bold;
  margin-bottom: 1rem;
}
.card-content > * { margin-bottom: 1rem; }
.card-content > *:last-child { margin-bottom: 0; }
.two-column {
  display: grid;
  grid-template-columns: 1fr;
  gap: 2rem;
  margin: 1.5rem 0;
}
.two-column.gap-sm { gap: 1rem; }
.two-column.gap-lg { gap: 3rem; }
@media (min-width: 768px) {
  .two-column { grid-template-columns: 1fr 1fr; }
}
.product-card {
  border: 1px solid #e5e7eb;
  border-radius: 0.5rem;
  overflow: hidden;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}
.product-card img {
  width: 100%;
  height: auto;
  display: block;
}
.product-card-content { padding: 1.5rem; }
.product-card-title {
  font-size: 1.25rem;
  font-weight: bold;
  margin-bottom: 0.5rem;
}
.product-card-description {
  color: #6b7280;
  margin-bottom: 1rem;
}
.product-card-button {
  display: inline-block;
  background-color: #2563eb;
  color: white;
  padding: 0.5rem 1rem;
  border-radius: 0.375rem;
  text-decoration: none;
  font-weight: 500;
}
img {
  max-width: 100%;
  height: auto;
  border-radius: 0.5rem;
}
figure { margin: 1.5rem 0; }
figcaption {
  text-align: center;
  font-size: 0.875rem;
  color: #6b7280;
  font-style: italic;
  margin-top: 0.75rem;
}
.site-footer {
  max-width: 48rem;
  margin: 0 auto;
  padding: 1.5rem;
  font-size: 0.875rem;
  color: #6b7280;
  border-top: 1px solid #e5e7eb;
}
"#;
