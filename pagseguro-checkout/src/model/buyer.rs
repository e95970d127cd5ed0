//! Buyer (`<sender>`) section of the checkout document.

use serde::{Serialize, Serializer};

/// Identity document type accepted by the checkout API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Brazilian individual taxpayer registry number.
    Cpf,
}

impl DocumentType {
    /// Wire text of the document type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
        }
    }
}

impl Serialize for DocumentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Identity document attached to the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Document type.
    #[serde(rename = "type")]
    pub kind: DocumentType,
    /// Document number, digits only.
    pub value: String,
}

/// Buyer phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Phone {
    /// Two-digit area code.
    #[serde(rename = "areaCode", skip_serializing_if = "String::is_empty")]
    pub area_code: String,
    /// Subscriber number.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub number: String,
}

/// Buyer information, rendered as `<sender>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buyer {
    /// Buyer email.
    pub email: String,
    /// Buyer full name.
    pub name: String,
    /// Optional phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    /// Identity documents, at most one per [`DocumentType`].
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "document_list")]
    pub documents: Vec<Document>,
    /// Birth date as `dd/MM/yyyy`.
    #[serde(rename = "bornDate", skip_serializing_if = "Option::is_none")]
    pub born_date: Option<String>,
}

impl Buyer {
    /// Creates a buyer with name and email only.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { email: email.into(), name: name.into(), ..Self::default() }
    }

    /// Sets the phone, replacing any previous one.
    pub fn set_phone(
        &mut self,
        area_code: impl Into<String>,
        number: impl Into<String>,
    ) -> &mut Self {
        self.phone = Some(Phone { area_code: area_code.into(), number: number.into() });
        self
    }

    /// Sets a document of the given type.
    ///
    /// An existing document of the same type is updated in place; the list
    /// never holds two entries of one type.
    pub fn set_document(&mut self, kind: DocumentType, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.documents.iter_mut().find(|document| document.kind == kind) {
            Some(document) => document.value = value,
            None => self.documents.push(Document { kind, value }),
        }
        self
    }

    /// Sets the buyer CPF.
    pub fn set_cpf(&mut self, cpf: impl Into<String>) -> &mut Self {
        self.set_document(DocumentType::Cpf, cpf)
    }

    /// Sets the birth date, rendered as `dd/MM/yyyy`.
    pub fn set_born_date(&mut self, day: u8, month: u8, year: u16) -> &mut Self {
        self.born_date = Some(format!("{day:02}/{month:02}/{year:04}"));
        self
    }
}

fn document_list<S: Serializer>(documents: &[Document], serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct DocumentList<'a> {
        document: &'a [Document],
    }

    DocumentList { document: documents }.serialize(serializer)
}
