//! Fixed package parts: content types, relationships, styles, numbering, header, footer.

use super::DocxOptions;

pub const STYLES_RID: &str = "rId1";
pub const NUMBERING_RID: &str = "rId2";
pub const HEADER_RID: &str = "rId3";
pub const FOOTER_RID: &str = "rId4";
/// Hyperlink relationships are numbered after the fixed parts.
const FIRST_LINK_RID: usize = 5;

pub const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT_PREFIX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml";

const MUTED: &str = "94A3B8";
const RUNNING_TEXT_SIZE: u32 = 14;

/// Relationship id of the n-th hyperlink (0-based).
pub fn link_rid(idx: usize) -> String {
    format!("rId{}", FIRST_LINK_RID + idx)
}

/// Escape text for element content and attribute values.
///
/// Control characters XML 1.0 cannot carry are dropped.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            _ => out.push(ch),
        }
    }
    out
}

pub fn content_types_xml() -> String {
    let overrides = [
        ("/word/document.xml", "document.main+xml"),
        ("/word/styles.xml", "styles+xml"),
        ("/word/numbering.xml", "numbering+xml"),
        ("/word/header1.xml", "header+xml"),
        ("/word/footer1.xml", "footer+xml"),
    ];

    let mut out = String::new();
    out.push_str(XML_DECL);
    out.push('\n');
    out.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    out.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    out.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for (part, kind) in overrides {
        out.push_str(&format!(
            r#"<Override PartName="{part}" ContentType="{CT_PREFIX}.{kind}"/>"#
        ));
    }
    out.push_str("</Types>");
    out
}

pub fn package_rels_xml() -> String {
    format!(
        r#"{XML_DECL}
<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_TYPE}/officeDocument" Target="word/document.xml"/></Relationships>"#
    )
}

/// Relationships of the main document part. `links` are hyperlink targets in rId order.
pub fn document_rels_xml(links: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(XML_DECL);
    out.push('\n');
    out.push_str(&format!(r#"<Relationships xmlns="{REL_NS}">"#));
    for (rid, kind, target) in [
        (STYLES_RID, "styles", "styles.xml"),
        (NUMBERING_RID, "numbering", "numbering.xml"),
        (HEADER_RID, "header", "header1.xml"),
        (FOOTER_RID, "footer", "footer1.xml"),
    ] {
        out.push_str(&format!(
            r#"<Relationship Id="{rid}" Type="{REL_TYPE}/{kind}" Target="{target}"/>"#
        ));
    }
    for (idx, href) in links.iter().enumerate() {
        out.push_str(&format!(
            r#"<Relationship Id="{rid}" Type="{REL_TYPE}/hyperlink" Target="{href}" TargetMode="External"/>"#,
            rid = link_rid(idx),
            href = xml_escape(href),
        ));
    }
    out.push_str("</Relationships>");
    out
}

pub fn styles_xml(options: &DocxOptions) -> String {
    let body_font = xml_escape(&options.body_font);
    format!(
        r#"{XML_DECL}
<w:styles xmlns:w="{W_NS}">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="{body_font}" w:hAnsi="{body_font}" w:cs="{body_font}"/><w:sz w:val="22"/></w:rPr></w:rPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Title">
    <w:name w:val="Title"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:jc w:val="center"/><w:spacing w:after="200"/></w:pPr>
    <w:rPr><w:b/><w:color w:val="1E293B"/><w:sz w:val="52"/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:outlineLvl w:val="0"/></w:pPr>
    <w:rPr><w:b/><w:color w:val="1E293B"/><w:sz w:val="28"/></w:rPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading2">
    <w:name w:val="heading 2"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:outlineLvl w:val="1"/></w:pPr>
    <w:rPr><w:b/><w:color w:val="334155"/><w:sz w:val="24"/></w:rPr>
  </w:style>
</w:styles>"#
    )
}

/// A single bullet list definition, referenced as numId 1.
pub fn numbering_xml() -> String {
    format!(
        r#"{XML_DECL}
<w:numbering xmlns:w="{W_NS}">
  <w:abstractNum w:abstractNumId="1">
    <w:multiLevelType w:val="hybridMultilevel"/>
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="1"/></w:num>
</w:numbering>"#
    )
}

fn muted_run(text: &str) -> String {
    format!(
        r#"<w:r><w:rPr><w:color w:val="{MUTED}"/><w:sz w:val="{RUNNING_TEXT_SIZE}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
        xml_escape(text)
    )
}

fn field(instr: &str) -> String {
    format!(
        r#"<w:fldSimple w:instr=" {instr} "><w:r><w:rPr><w:color w:val="{MUTED}"/><w:sz w:val="{RUNNING_TEXT_SIZE}"/></w:rPr><w:t>1</w:t></w:r></w:fldSimple>"#
    )
}

/// Running header: "<prefix> | <topic> | <label>", right aligned.
pub fn header_xml(options: &DocxOptions, topic: &str) -> String {
    let text = format!(
        "{} | {} | {}",
        options.prefix, topic, options.confidential_label
    );
    format!(
        r#"{XML_DECL}
<w:hdr xmlns:w="{W_NS}"><w:p><w:pPr><w:jc w:val="right"/></w:pPr>{}</w:p></w:hdr>"#,
        muted_run(&text)
    )
}

/// Running footer with the generation date and live page fields.
pub fn footer_xml(generated_on: &str) -> String {
    format!(
        r#"{XML_DECL}
<w:ftr xmlns:w="{W_NS}"><w:p><w:pPr><w:jc w:val="center"/></w:pPr>{}{}{}{}</w:p></w:ftr>"#,
        muted_run(&format!("Analysis Generated on {generated_on} | Page ")),
        field("PAGE"),
        muted_run(" of "),
        field("NUMPAGES"),
    )
}
