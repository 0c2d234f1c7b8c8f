//! Built-in career catalog: related-role families for survey roles and the
//! wholly new roles that only exist as synthetic rows.

use crate::expansion::synthetic::Industry;

/// Survey role to related roles that share its applicant profile.
pub const CAREER_EXPANSION: &[(&str, &[&str])] = &[
    (
        "Applications Developer",
        &[
            "Mobile App Developer",
            "Web Developer",
            "Software Developer",
            "Full Stack Developer",
            "Frontend Developer",
            "Backend Developer",
        ],
    ),
    (
        "Software Developer",
        &[
            "Senior Software Engineer",
            "Lead Developer",
            "Software Architect",
            "DevOps Engineer",
            "Site Reliability Engineer",
            "Platform Engineer",
        ],
    ),
    (
        "Software Engineer",
        &[
            "Machine Learning Engineer",
            "AI Engineer",
            "Data Engineer",
            "Cloud Engineer",
            "Automation Engineer",
            "Robotics Engineer",
        ],
    ),
    (
        "Database Developer",
        &[
            "Database Administrator",
            "Data Architect",
            "Data Warehouse Developer",
            "Big Data Engineer",
            "Database Analyst",
            "Data Migration Specialist",
        ],
    ),
    (
        "Web Developer",
        &[
            "UI/UX Designer",
            "Frontend Specialist",
            "WordPress Developer",
            "E-commerce Developer",
            "JAMstack Developer",
            "Progressive Web App Developer",
        ],
    ),
    (
        "Network Security Engineer",
        &[
            "Cybersecurity Analyst",
            "Information Security Specialist",
            "Penetration Tester",
            "Security Consultant",
            "Incident Response Analyst",
            "Security Architect",
        ],
    ),
    (
        "Systems Security Administrator",
        &[
            "Cloud Security Engineer",
            "Identity Management Specialist",
            "Compliance Officer",
            "Security Operations Center Analyst",
            "Vulnerability Assessment Specialist",
        ],
    ),
    (
        "Mobile Applications Developer",
        &[
            "iOS Developer",
            "Android Developer",
            "React Native Developer",
            "Flutter Developer",
            "Mobile Game Developer",
            "AR/VR Developer",
        ],
    ),
    (
        "Software Quality Assurance (QA) / Testing",
        &[
            "QA Engineer",
            "Test Automation Engineer",
            "Performance Test Engineer",
            "Manual Tester",
            "QA Manager",
            "Test Lead",
        ],
    ),
    (
        "Technical Support",
        &[
            "IT Support Specialist",
            "Help Desk Technician",
            "System Administrator",
            "Customer Success Engineer",
            "Technical Account Manager",
        ],
    ),
    (
        "UX Designer",
        &[
            "Product Designer",
            "User Researcher",
            "Interaction Designer",
            "Service Designer",
            "Design System Manager",
            "Creative Director",
        ],
    ),
    (
        "CRM Technical Developer",
        &[
            "Salesforce Developer",
            "CRM Consultant",
            "Business Analyst",
            "Process Automation Specialist",
            "Integration Specialist",
        ],
    ),
];

pub const BUSINESS_ROLES: &[&str] = &[
    "Product Manager",
    "Project Manager",
    "Business Analyst",
    "Strategy Consultant",
    "Digital Marketing Manager",
    "Sales Manager",
    "Operations Manager",
    "HR Manager",
    "Financial Analyst",
    "Investment Banker",
    "Management Consultant",
    "Supply Chain Manager",
    "Risk Analyst",
    "Marketing Coordinator",
    "Business Development Manager",
];

pub const CREATIVE_ROLES: &[&str] = &[
    "Graphic Designer",
    "Video Editor",
    "Content Creator",
    "Social Media Manager",
    "Brand Manager",
    "Creative Director",
    "Photographer",
    "Animation Artist",
    "Motion Graphics Designer",
    "Interior Designer",
    "Fashion Designer",
    "Copywriter",
];

pub const EMERGING_ROLES: &[&str] = &[
    "Data Scientist",
    "AI Research Scientist",
    "Blockchain Developer",
    "IoT Developer",
    "Digital Transformation Specialist",
    "Sustainability Consultant",
    "Virtual Reality Developer",
    "Augmented Reality Developer",
    "Digital Twin Specialist",
    "Smart City Planner",
    "Biomedical Engineer",
    "Health Informatics Specialist",
    "EdTech Developer",
];

/// Role names that always lean towards management.
pub const MANAGEMENT_ROLES: &[&str] = &[
    "Product Manager",
    "Project Manager",
    "Operations Manager",
    "HR Manager",
    "Sales Manager",
    "Marketing Manager",
    "Creative Director",
];

/// Roles synthesized by the industry catalog, grouped by the industry whose
/// feature pattern they are sampled from. A title listed under several
/// industries keeps its first one.
pub const INDUSTRY_ROLES: &[(Industry, &[&str])] = &[
    (
        Industry::TechnologySoftware,
        &[
            "Software Engineer",
            "Full Stack Developer",
            "Frontend Developer",
            "Backend Developer",
            "Mobile App Developer",
            "Web Developer",
            "Game Developer",
            "Embedded Systems Engineer",
            "Software Architect",
            "Technical Lead",
            "Principal Engineer",
            "Staff Engineer",
            "Firmware Engineer",
            "API Developer",
            "Database Developer",
            "Integration Developer",
            "Performance Engineer",
            "Security Software Engineer",
            "Application Developer",
            "Systems Software Engineer",
            "Platform Engineer",
            "Middleware Developer",
        ],
    ),
    (
        Industry::DataScienceAi,
        &[
            "Data Scientist",
            "Machine Learning Engineer",
            "AI Research Scientist",
            "Data Engineer",
            "ML Operations Engineer",
            "Computer Vision Engineer",
            "NLP Engineer",
            "Research Scientist",
            "Quantitative Analyst",
            "Business Intelligence Analyst",
            "Data Architect",
            "Deep Learning Engineer",
            "AI Product Manager",
            "Data Analytics Consultant",
            "Statistical Analyst",
            "Predictive Modeler",
            "Data Mining Specialist",
            "Big Data Engineer",
            "Hadoop Developer",
            "Spark Developer",
            "MLOps Specialist",
            "AI Ethics Researcher",
            "Robotics Engineer",
            "Autonomous Systems Engineer",
        ],
    ),
    (
        Industry::Cybersecurity,
        &[
            "Cybersecurity Analyst",
            "Penetration Tester",
            "Security Engineer",
            "Security Architect",
            "Incident Response Specialist",
            "Forensics Analyst",
            "Compliance Officer",
            "Risk Analyst",
            "Chief Information Security Officer",
            "Security Consultant",
            "Ethical Hacker",
            "Malware Analyst",
            "Vulnerability Assessor",
            "Security Auditor",
            "Cryptography Specialist",
            "Network Security Engineer",
            "Application Security Engineer",
            "Cloud Security Specialist",
            "Identity Management Specialist",
            "Privacy Officer",
            "Threat Intelligence Analyst",
            "Security Operations Center Analyst",
        ],
    ),
    (
        Industry::CloudDevops,
        &[
            "DevOps Engineer",
            "Cloud Architect",
            "Site Reliability Engineer",
            "Platform Engineer",
            "Infrastructure Engineer",
            "Release Manager",
            "Automation Engineer",
            "Cloud Security Engineer",
            "Kubernetes Engineer",
            "Cloud Solutions Architect",
            "Systems Engineer",
            "Build Engineer",
            "Configuration Management Specialist",
            "Monitoring Specialist",
            "Container Engineer",
            "Infrastructure as Code Engineer",
            "Cloud Migration Specialist",
            "Multi-Cloud Architect",
            "Edge Computing Engineer",
            "Serverless Architect",
            "GitOps Engineer",
        ],
    ),
    (
        Industry::ProductDesign,
        &[
            "Product Manager",
            "UX Designer",
            "UI Designer",
            "Product Designer",
            "Design Researcher",
            "Product Owner",
            "Strategy Manager",
            "Growth Product Manager",
            "Technical Product Manager",
            "Design Systems Lead",
            "Creative Director",
            "User Researcher",
            "Interaction Designer",
            "Visual Designer",
            "Service Designer",
            "Design Ops Manager",
            "Content Designer",
            "Brand Designer",
            "Motion Graphics Designer",
            "Design Strategist",
            "Product Marketing Manager",
            "UX Writer",
            "Information Architect",
            "Usability Specialist",
            "Design Thinking Facilitator",
        ],
    ),
    (
        Industry::BusinessManagement,
        &[
            "Business Analyst",
            "Management Consultant",
            "Project Manager",
            "Strategy Consultant",
            "Operations Manager",
            "Program Manager",
            "Business Development Manager",
            "Sales Manager",
            "Marketing Manager",
            "Financial Analyst",
            "Investment Banker",
            "Risk Manager",
            "Portfolio Manager",
            "Venture Capitalist",
            "Private Equity Analyst",
            "Corporate Development",
            "Business Intelligence Manager",
            "Operations Research Analyst",
            "Management Trainee",
            "Executive Assistant",
            "Chief Operating Officer",
            "Chief Financial Officer",
            "Supply Chain Manager",
            "Procurement Manager",
            "Change Management Consultant",
        ],
    ),
    (
        Industry::HealthcareBiotech,
        &[
            "Biomedical Engineer",
            "Health Informatics Specialist",
            "Clinical Data Analyst",
            "Medical Device Engineer",
            "Pharmaceutical Researcher",
            "Healthcare Data Scientist",
            "Telemedicine Specialist",
            "Health IT Consultant",
            "Bioinformatics Scientist",
            "Medical Software Developer",
            "Healthcare Product Manager",
            "Clinical Research Coordinator",
            "Regulatory Affairs Specialist",
            "Quality Assurance Specialist",
            "Biostatistician",
            "Epidemiologist",
            "Health Economics Researcher",
            "Medical Writer",
            "Clinical Trial Manager",
            "Pharmacovigilance Specialist",
            "Medical AI Researcher",
            "Digital Health Specialist",
            "Precision Medicine Specialist",
            "Genomics Analyst",
        ],
    ),
    (
        Industry::FinanceFintech,
        &[
            "Quantitative Analyst",
            "Algorithmic Trader",
            "Financial Software Engineer",
            "Blockchain Developer",
            "Cryptocurrency Analyst",
            "Risk Analyst",
            "Financial Data Scientist",
            "Investment Analyst",
            "Fintech Product Manager",
            "Regulatory Technology Specialist",
            "Payment Systems Engineer",
            "Credit Risk Modeler",
            "Trading Systems Developer",
            "Financial Architect",
            "Robo-Advisor Developer",
            "InsurTech Specialist",
            "RegTech Consultant",
            "Digital Banking Specialist",
            "Alternative Investment Analyst",
            "ESG Analyst",
            "Financial Technology Consultant",
            "Capital Markets Analyst",
            "Derivatives Analyst",
            "Portfolio Risk Manager",
            "Compliance Technology Specialist",
        ],
    ),
    (
        Industry::MediaEntertainment,
        &[
            "Game Developer",
            "3D Artist",
            "Video Editor",
            "Motion Graphics Designer",
            "Sound Engineer",
            "Content Creator",
            "Social Media Manager",
            "Digital Marketing Specialist",
            "Streaming Technology Engineer",
            "VR/AR Developer",
            "Animation Director",
            "Post-Production Supervisor",
            "Digital Content Producer",
            "Game Designer",
            "Level Designer",
            "Character Artist",
            "Technical Artist",
            "Game Producer",
            "Esports Manager",
            "Live Streaming Producer",
            "Interactive Media Designer",
            "Audio Engineer",
            "Video Game Writer",
            "Community Manager",
            "Brand Content Manager",
        ],
    ),
    (
        Industry::EducationResearch,
        &[
            "Educational Technology Specialist",
            "Research Scientist",
            "Data Science Instructor",
            "Online Course Creator",
            "Academic Researcher",
            "EdTech Product Manager",
            "Learning Analytics Specialist",
            "Instructional Designer",
            "AI in Education Researcher",
            "STEM Education Coordinator",
            "Technical Trainer",
            "Curriculum Developer",
            "Learning Experience Designer",
            "Educational Data Analyst",
            "Virtual Reality Training Specialist",
            "Adaptive Learning Specialist",
            "MOOCs Platform Developer",
            "Educational Assessment Specialist",
            "Digital Pedagogy Consultant",
            "Learning Technology Researcher",
        ],
    ),
    (
        Industry::ManufacturingEngineering,
        &[
            "Industrial Engineer",
            "Manufacturing Engineer",
            "Quality Engineer",
            "Process Engineer",
            "Mechanical Engineer",
            "Electrical Engineer",
            "Chemical Engineer",
            "Materials Engineer",
            "Automation Engineer",
            "Robotics Engineer",
            "Control Systems Engineer",
            "Maintenance Engineer",
            "Lean Manufacturing Specialist",
            "Six Sigma Black Belt",
            "Production Manager",
            "Plant Manager",
            "Supply Chain Engineer",
            "Logistics Engineer",
            "Safety Engineer",
            "Environmental Engineer",
            "Reliability Engineer",
            "Test Engineer",
            "Design Engineer",
            "Project Engineer",
            "Technical Sales Engineer",
            "Field Service Engineer",
            "Application Engineer",
        ],
    ),
    (
        Industry::SalesMarketing,
        &[
            "Digital Marketing Manager",
            "SEO Specialist",
            "PPC Specialist",
            "Content Marketing Manager",
            "Social Media Marketing Manager",
            "Email Marketing Specialist",
            "Marketing Automation Specialist",
            "Growth Hacker",
            "Performance Marketing Manager",
            "Brand Manager",
            "Product Marketing Manager",
            "Customer Success Manager",
            "Sales Development Representative",
            "Account Executive",
            "Sales Engineer",
            "Channel Partner Manager",
            "Revenue Operations Manager",
            "Marketing Analyst",
            "Conversion Rate Optimization Specialist",
            "Affiliate Marketing Manager",
            "Influencer Marketing Manager",
            "Marketing Technology Specialist",
            "Customer Acquisition Manager",
            "Retention Marketing Manager",
        ],
    ),
    (
        Industry::TransportationLogistics,
        &[
            "Transportation Engineer",
            "Logistics Coordinator",
            "Supply Chain Analyst",
            "Fleet Manager",
            "Warehouse Manager",
            "Distribution Manager",
            "Freight Broker",
            "Transportation Planner",
            "Autonomous Vehicle Engineer",
            "Traffic Engineer",
            "Logistics Technology Specialist",
            "Maritime Technology Specialist",
            "Aviation Systems Engineer",
            "Railway Systems Engineer",
            "Last-Mile Delivery Specialist",
        ],
    ),
    (
        Industry::LegalCompliance,
        &[
            "Legal Technology Specialist",
            "Compliance Officer",
            "Data Privacy Officer",
            "Legal Analyst",
            "Contract Manager",
            "Regulatory Affairs Manager",
            "IP Attorney",
            "Corporate Counsel",
            "Legal Operations Manager",
            "eDiscovery Specialist",
            "Legal Research Analyst",
            "Paralegal",
            "Legal Project Manager",
            "Ethics and Compliance Manager",
            "Legal Technology Consultant",
        ],
    ),
    (
        Industry::EnergyEnvironment,
        &[
            "Renewable Energy Engineer",
            "Environmental Data Scientist",
            "Sustainability Consultant",
            "Energy Analyst",
            "Solar Panel Engineer",
            "Wind Energy Technician",
            "Smart Grid Engineer",
            "Energy Storage Specialist",
            "Carbon Trading Analyst",
            "Environmental Compliance Manager",
            "Clean Technology Developer",
            "Energy Efficiency Specialist",
            "Battery Technology Engineer",
            "Hydroelectric Engineer",
            "Geothermal Engineer",
            "Nuclear Engineer",
            "Environmental Engineer",
            "Climate Change Analyst",
            "Green Building Consultant",
            "Waste Management Specialist",
        ],
    ),
    (
        Industry::ConsultingAdvisory,
        &[
            "Management Consultant",
            "Technology Consultant",
            "Strategy Consultant",
            "Digital Transformation Consultant",
            "Change Management Consultant",
            "Process Improvement Consultant",
            "IT Consultant",
            "Security Consultant",
            "Data Analytics Consultant",
            "Cloud Migration Consultant",
            "Agile Coach",
            "Scrum Master",
            "Business Process Consultant",
            "Organizational Development Consultant",
            "Performance Improvement Consultant",
            "Risk Management Consultant",
            "Compliance Consultant",
            "Merger & Acquisition Consultant",
            "Innovation Consultant",
            "Customer Experience Consultant",
        ],
    ),
];

pub fn owned(roles: &[&str]) -> Vec<String> {
    roles.iter().map(|r| r.to_string()).collect()
}
